use std::cell::RefCell;
use std::rc::Rc;

pub type SubId = usize;

/// Cloneable handle to an observable value. Single-threaded; subscribers
/// run synchronously inside `set`/`update`.
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: Vec<Option<Box<dyn Fn(&T)>>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: Vec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T) {
        let mut inner = self.0.borrow_mut();
        inner.value = v;
        let vref = &inner.value;
        for s in inner.subs.iter().flatten() {
            s(vref);
        }
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        let mut inner = self.0.borrow_mut();
        f(&mut inner.value);
        let vref = &inner.value;
        for s in inner.subs.iter().flatten() {
            s(vref);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        inner.subs.push(Some(Box::new(f)));
        inner.subs.len() - 1
    }

    pub fn unsubscribe(&self, id: SubId) {
        let mut inner = self.0.borrow_mut();
        if let Some(slot) = inner.subs.get_mut(id) {
            *slot = None;
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
