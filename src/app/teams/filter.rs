use futures::future::{ok as fut_ok, poll_fn};
use futures::{Async, Future, Stream};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio_timer::Interval;

use crate::app::teams::{dedup_teams, TeamLookup, TeamOption};
use crate::app::Spawn;
use crate::dom::{SelectField, SelectOption, Subscription, WeekField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Idle,
    Loading,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Cleared,
    Populated {
        teams: Vec<TeamOption>,
    },
    Failed,
    Stale,
}

pub type FilterResponse = dyn Future<Item=FilterOutcome, Error=()>;

struct FilterInner<L, F> {
    lookup: L,
    absent_team: Rc<RefCell<F>>,
    drawn_team: Rc<RefCell<F>>,
    // bumped by every trigger and by detaching
    generation: Cell<u64>,
    state: Cell<FilterState>,
}

impl<L, F: SelectField> FilterInner<L, F> {
    fn next_generation(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    fn set_disabled(&self, disabled: bool) {
        self.absent_team.borrow_mut().set_disabled(disabled);
        self.drawn_team.borrow_mut().set_disabled(disabled);
    }

    fn selection(&self) -> (Option<String>, Option<String>) {
        (self.absent_team.borrow().value(), self.drawn_team.borrow().value())
    }

    fn clear(&self) {
        self.absent_team.borrow_mut().clear_options();
        self.drawn_team.borrow_mut().clear_options();
    }

    fn populate(&self, teams: &[TeamOption], previous: (Option<String>, Option<String>)) {
        self.clear();

        let mut absent_team = self.absent_team.borrow_mut();
        let mut drawn_team = self.drawn_team.borrow_mut();
        for team in teams {
            absent_team.append_option(SelectOption::from(team.clone()));
            drawn_team.append_option(SelectOption::from(team.clone()));
        }

        if previous.0.is_some() {
            absent_team.set_value(previous.0.as_ref().map(String::as_str));
        }
        if previous.1.is_some() {
            drawn_team.set_value(previous.1.as_ref().map(String::as_str));
        }
    }

    fn finish(&self) {
        self.set_disabled(false);
        self.state.set(FilterState::Idle);
    }

    fn release(&self) {
        let generation = self.next_generation();
        debug!("Filter detached, lookups before generation {} are stale", generation);
        self.finish();
    }
}

pub struct CascadingTeamFilter<L, F> {
    inner: Rc<FilterInner<L, F>>,
}

impl<L, F> Clone for CascadingTeamFilter<L, F> {
    fn clone(&self) -> Self {
        CascadingTeamFilter { inner: self.inner.clone() }
    }
}

impl<L, F> CascadingTeamFilter<L, F>
    where L: TeamLookup + 'static,
          F: SelectField + 'static
{
    pub fn new(lookup: L, absent_team: Rc<RefCell<F>>, drawn_team: Rc<RefCell<F>>) -> Self {
        CascadingTeamFilter {
            inner: Rc::new(FilterInner {
                lookup,
                absent_team,
                drawn_team,
                generation: Cell::new(0),
                state: Cell::new(FilterState::Idle),
            }),
        }
    }

    pub fn state(&self) -> FilterState {
        self.inner.state.get()
    }

    pub fn on_week_change(&self, week_id: Option<&str>) -> Box<FilterResponse> {
        let generation = self.inner.next_generation();

        match week_id.filter(|week_id| !week_id.is_empty()) {
            Some(week_id) => self.update_team_options(week_id, generation),
            None => {
                debug!("Week cleared, resetting team selects");
                self.inner.clear();
                self.inner.finish();
                Box::new(fut_ok(FilterOutcome::Cleared))
            }
        }
    }

    fn update_team_options(&self, week_id: &str, generation: u64) -> Box<FilterResponse> {
        let previous = self.inner.selection();
        self.inner.set_disabled(true);
        self.inner.state.set(FilterState::Loading);
        debug!("Loading teams for week {} (generation {})", week_id, generation);

        let inner = self.inner.clone();
        Box::new(
            self.inner
                .lookup
                .teams_for_week(week_id)
                .then(move |result| {
                    if !inner.is_current(generation) {
                        debug!("Dropping stale team lookup (generation {})", generation);
                        return Ok(FilterOutcome::Stale);
                    }

                    let outcome = match result {
                        Ok(teams) => {
                            let teams = dedup_teams(teams);
                            inner.populate(&teams, previous);
                            FilterOutcome::Populated { teams }
                        }
                        Err(e) => {
                            error!("Failed to load teams for selected week: {}", e);
                            FilterOutcome::Failed
                        }
                    };
                    inner.finish();

                    Ok::<_, ()>(outcome)
                })
        )
    }

    /// Follows `week` until the returned handle is dropped or detached; detaching
    /// turns lookups still in flight stale.
    ///
    /// A week that is already selected (an existing record being edited) is loaded right away.
    pub fn attach<S>(&self, week: &WeekField, spawner: S) -> AttachedFilter
        where S: Spawn + 'static
    {
        let spawner = Rc::new(spawner);

        let filter = self.clone();
        let handler_spawner = spawner.clone();
        let subscription = week.subscribe(move |week_id| {
            handler_spawner.spawn(Box::new(filter.on_week_change(week_id).map(|_| ())));
        });

        if let Some(week_id) = week.value() {
            spawner.spawn(Box::new(self.on_week_change(Some(week_id.as_str())).map(|_| ())));
        }

        let inner = self.inner.clone();
        AttachedFilter {
            subscription: Some(subscription),
            release: Some(Box::new(move || inner.release())),
        }
    }

    /// Resolves once no lookup is in flight. Needs a running timer.
    pub fn settled(&self) -> Box<dyn Future<Item=(), Error=()>> {
        let inner = self.inner.clone();
        let tick = Duration::from_millis(20);
        let mut ticks = Interval::new(Instant::now() + tick, tick);

        Box::new(poll_fn(move || {
            while inner.state.get() == FilterState::Loading {
                match ticks.poll() {
                    Ok(Async::Ready(Some(_))) => continue,
                    Ok(Async::Ready(None)) | Err(_) => return Err(()),
                    Ok(Async::NotReady) => return Ok(Async::NotReady),
                }
            }

            Ok(Async::Ready(()))
        }))
    }
}

pub struct AttachedFilter {
    subscription: Option<Subscription>,
    release: Option<Box<dyn FnOnce()>>,
}

impl AttachedFilter {
    pub fn detach(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for AttachedFilter {
    fn drop(&mut self) {
        self.teardown();
    }
}
