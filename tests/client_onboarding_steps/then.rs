//! Then steps for client onboarding BDD scenarios.

use super::world::OnboardingWorld;
use onboarding::onboarding::{
    domain::{OnboardingDomainError, Selection, Task, ordering::is_dense},
    services::OnboardingError,
};
use rstest_bdd_macros::then;

#[then(r#"the selected client is "{name}""#)]
fn selected_client_is(world: &OnboardingWorld, name: String) -> Result<(), eyre::Report> {
    let selected = world
        .tracker()?
        .selected_client()
        .ok_or_else(|| eyre::eyre!("expected {name} to be selected, but nothing is"))?;
    eyre::ensure!(
        selected.name().as_str() == name,
        "expected {name} to be selected, found {}",
        selected.name()
    );
    Ok(())
}

#[then("no client is selected")]
fn no_client_selected(world: &OnboardingWorld) -> Result<(), eyre::Report> {
    let selection = world.tracker()?.selection();
    eyre::ensure!(
        selection == &Selection::NoneSelected,
        "expected no selection, found {selection:?}"
    );
    Ok(())
}

#[then("the task list has {count:usize} tasks")]
fn task_list_has(world: &OnboardingWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = world.tracker()?.tasks();
    eyre::ensure!(
        tasks.len() == count,
        "expected {count} tasks, found {}",
        tasks.len()
    );
    Ok(())
}

#[then(r#"task {index:usize} is "{name}""#)]
fn task_at_index_is(
    world: &OnboardingWorld,
    index: usize,
    name: String,
) -> Result<(), eyre::Report> {
    let task = world
        .tracker()?
        .tasks()
        .get(index)
        .ok_or_else(|| eyre::eyre!("no task at position {index}"))?;
    eyre::ensure!(
        task.name().as_str() == name,
        "expected {name} at position {index}, found {}",
        task.name()
    );
    Ok(())
}

#[then("the task positions are dense")]
fn task_positions_are_dense(world: &OnboardingWorld) -> Result<(), eyre::Report> {
    let tasks = world.tracker()?.tasks();
    let orders: Vec<u32> = tasks.iter().map(Task::order).collect();
    eyre::ensure!(is_dense(tasks), "positions are not dense: {orders:?}");
    Ok(())
}

#[then("the action fails with a validation error")]
fn action_fails_with_validation(world: &OnboardingWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the action to fail"))?;
    eyre::ensure!(
        matches!(
            error,
            OnboardingError::Validation(OnboardingDomainError::EmptyClientName)
        ),
        "expected a validation error, got {error:?}"
    );
    eyre::ensure!(!error.is_fatal(), "validation errors are not fatal");
    Ok(())
}

#[then("the client list is empty")]
fn client_list_is_empty(world: &OnboardingWorld) -> Result<(), eyre::Report> {
    let count = world.tracker()?.clients().len();
    eyre::ensure!(count == 0, "expected no clients, found {count}");
    Ok(())
}

#[then("the tracker reports a fatal fetch failure")]
fn tracker_reports_fetch_failure(world: &OnboardingWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the live view to fail"))?;
    eyre::ensure!(
        matches!(error, OnboardingError::Fetch(_)) && error.is_fatal(),
        "expected a fatal fetch failure, got {error:?}"
    );
    eyre::ensure!(
        world.tracker()?.failure() == Some(error),
        "tracker should keep the failure"
    );
    Ok(())
}
