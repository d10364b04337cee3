//! Given steps for client onboarding BDD scenarios.

use std::sync::Arc;

use super::world::{OnboardingWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use onboarding::onboarding::services::ClientCoordinator;
use rstest_bdd_macros::given;

fn seed_client(world: &OnboardingWorld, name: &str) -> Result<(), eyre::Report> {
    let coordinator = ClientCoordinator::new(Arc::clone(&world.store), Arc::new(DefaultClock));
    run_async(coordinator.create_client_with_seed_tasks(&world.session, name))
        .wrap_err_with(|| format!("seed client {name} for scenario"))?;
    Ok(())
}

#[given("an empty onboarding workspace")]
fn empty_workspace(world: &mut OnboardingWorld) -> Result<(), eyre::Report> {
    world.start_tracker()
}

#[given(r#"a workspace with a client named "{name}""#)]
fn workspace_with_client(world: &mut OnboardingWorld, name: String) -> Result<(), eyre::Report> {
    seed_client(world, &name)?;
    world.start_tracker()
}

#[given(r#"a workspace with clients "{first}" and "{second}""#)]
fn workspace_with_two_clients(
    world: &mut OnboardingWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    seed_client(world, &first)?;
    seed_client(world, &second)?;
    world.start_tracker()
}

#[given(r#"the user has selected client "{name}""#)]
fn user_has_selected_client(
    world: &mut OnboardingWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let client_id = world.client_named(&name)?;
    let tracker = world.tracker_mut()?;
    tracker
        .select_client(&client_id)
        .wrap_err("select client in scenario setup")?;
    tracker.apply_pending()?;
    Ok(())
}
