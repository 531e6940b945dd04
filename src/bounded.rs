//! Three integers kept in order, `a <= b <= c`, inside `[MIN, MAX]`.
//!
//! Edits go through [`repair`], which decides from the field that was just
//! edited which neighbour gives way.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::event::{EventBus, EventHandler};
use crate::state::PersistenceResult;

pub const MIN: i64 = 0;
pub const MAX: i64 = 100;

/// Which value the user edited last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    A,
    B,
    C,
}

impl Field {
    fn index(self) -> usize {
        match self {
            Field::A => 0,
            Field::B => 1,
            Field::C => 2,
        }
    }
}

/// Restore `MIN <= a <= b <= c <= MAX`.
///
/// `a` and `c` are clamped into range and `b` is kept non-negative. If `a`
/// passed `c`, `c` is pulled up when `a` was edited; otherwise `a` is pulled
/// down. `b` always yields to its neighbours.
pub fn repair(a: i64, b: i64, c: i64, last_changed: Option<Field>) -> (i64, i64, i64) {
    let mut a = a.clamp(MIN, MAX);
    let mut b = b.max(MIN);
    let mut c = c.clamp(MIN, MAX);

    if a > c {
        match last_changed {
            Some(Field::A) => c = a,
            _ => a = c,
        }
    }
    if b < a {
        b = a;
    }
    if b > c {
        b = c;
    }
    (a, b, c)
}

/// Stored values of a [`BoundedTriple`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Triple {
    pub a: i64,
    pub b: i64,
    pub c: i64,
}

impl Triple {
    pub fn get(&self, field: Field) -> i64 {
        match field {
            Field::A => self.a,
            Field::B => self.b,
            Field::C => self.c,
        }
    }
}

impl Default for Triple {
    fn default() -> Self {
        Self { a: 1, b: 50, c: 100 }
    }
}

/// Observable ordered triple
#[derive(Debug, Default)]
pub struct BoundedTriple {
    values: Triple,
    events: EventBus<Triple>,
}

impl BoundedTriple {
    /// Create a triple, repairing the initial values
    pub fn new(a: i64, b: i64, c: i64) -> Self {
        let (a, b, c) = repair(a, b, c, None);
        Self {
            values: Triple { a, b, c },
            events: EventBus::new(),
        }
    }

    pub fn subscribe(&self, handler: impl EventHandler<Triple> + 'static) {
        self.events.subscribe(handler);
    }

    pub fn values(&self) -> Triple {
        self.values
    }

    /// Store new values; subscribers hear about it only if something changed
    pub fn set_abc(&mut self, a: i64, b: i64, c: i64) {
        let current = self.values;
        let last_changed = if a != current.a {
            Field::A
        } else if b != current.b {
            Field::B
        } else if c != current.c {
            Field::C
        } else {
            return;
        };

        let (a, b, c) = repair(a, b, c, Some(last_changed));
        let repaired = Triple { a, b, c };
        if repaired != current {
            debug!("Triple {:?} -> {:?}", current, repaired);
            self.values = repaired;
            self.events.emit(repaired);
        }
    }

    /// Replace one field from user text; text that is not an integer is ignored
    pub fn set_from_text(&mut self, field: Field, text: &str) {
        let Ok(value) = text.trim().parse::<i64>() else {
            debug!("Ignoring non-integer input {:?}", text);
            return;
        };
        self.set(field, value);
    }

    /// Replace one field, keeping the other two
    pub fn set(&mut self, field: Field, value: i64) {
        let Triple { a, b, c } = self.values;
        match field {
            Field::A => self.set_abc(value, b, c),
            Field::B => self.set_abc(a, value, c),
            Field::C => self.set_abc(a, b, value),
        }
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string(&self.values)?)
    }

    /// Load from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let Triple { a, b, c } = serde_json::from_str(json)?;
        Ok(Self::new(a, b, c))
    }
}

/// Text typed into the value fields but not yet committed.
///
/// A field without a draft shows the stored value.
#[derive(Debug, Clone, Default)]
pub struct Drafts {
    texts: [Option<String>; 3],
}

impl Drafts {
    /// What the field for `field` should display
    pub fn text(&self, field: Field, values: Triple) -> String {
        self.texts[field.index()]
            .clone()
            .unwrap_or_else(|| values.get(field).to_string())
    }

    pub fn edit(&mut self, field: Field, text: String) {
        self.texts[field.index()] = Some(text);
    }

    /// Hand the draft to `triple` and go back to showing the stored value
    pub fn commit(&mut self, field: Field, triple: &mut BoundedTriple) {
        if let Some(text) = self.texts[field.index()].take() {
            triple.set_from_text(field, &text);
        }
    }
}
