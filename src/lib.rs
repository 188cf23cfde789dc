extern crate actix_web;
extern crate futures;
extern crate serde_json;
#[macro_use] extern crate serde_derive;
extern crate actix;
#[macro_use] extern crate failure;
extern crate url;
extern crate chrono;
extern crate chrono_tz;
extern crate tokio_timer;
#[macro_use] extern crate log;

pub mod app;
pub mod dom;
pub mod settings;
