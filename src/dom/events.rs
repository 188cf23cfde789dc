use std::cell::RefCell;
use std::rc::{Rc, Weak};

type ChangeHandler = Rc<dyn Fn(Option<&str>)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    handlers: Vec<(u64, ChangeHandler)>,
}

#[derive(Default)]
pub struct WeekField {
    value: RefCell<Option<String>>,
    listeners: Rc<RefCell<Listeners>>,
}

impl WeekField {
    pub fn new(initial: Option<&str>) -> Self {
        WeekField {
            value: RefCell::new(normalize(initial)),
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    pub fn select(&self, value: Option<&str>) {
        let value = normalize(value);
        if *self.value.borrow() == value {
            return;
        }

        *self.value.borrow_mut() = value;
        self.dispatch_change();
    }

    pub fn dispatch_change(&self) {
        // handlers may subscribe or unsubscribe while being notified
        let handlers: Vec<ChangeHandler> = self
            .listeners
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        let value = self.value();
        handlers
            .iter()
            .for_each(|handler| handler(value.as_ref().map(String::as_str)));
    }

    pub fn subscribe<H>(&self, handler: H) -> Subscription
        where H: Fn(Option<&str>) + 'static
    {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;

        let handler: ChangeHandler = Rc::new(handler);
        listeners.handlers.push((id, handler));

        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().handlers.len()
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(|v| v.to_owned())
}

pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let id = self.id;
            listeners.borrow_mut().handlers.retain(|(handler_id, _)| *handler_id != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}
