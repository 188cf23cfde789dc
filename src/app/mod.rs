use futures::Future;

pub mod codes;
pub mod forecast;
pub mod league_day;
pub mod provider;
pub mod teams;
pub mod widget;

pub type Date = String;
pub type Temperature = f64;

pub type Task = Box<dyn Future<Item=(), Error=()>>;

pub trait Spawn {
    fn spawn(&self, task: Task);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ArbiterSpawn;

impl Spawn for ArbiterSpawn {
    fn spawn(&self, task: Task) {
        actix::Arbiter::spawn(task);
    }
}
