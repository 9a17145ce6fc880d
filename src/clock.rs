use chrono::{Local, NaiveDate};

/// Source of the current local date, read on every recomputation.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[cfg(test)]
pub struct FixedClock(pub std::cell::Cell<NaiveDate>);

#[cfg(test)]
impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(std::cell::Cell::new(date))
    }

    pub fn set(&self, date: NaiveDate) {
        self.0.set(date);
    }
}

#[cfg(test)]
impl Clock for std::rc::Rc<FixedClock> {
    fn today(&self) -> NaiveDate {
        self.0.get()
    }
}
