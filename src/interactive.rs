//! Mount points for interactive cards.
//!
//! An interactive entry names a handler id. The registry maps ids to
//! constructors; unknown ids mount nothing.

use std::collections::HashMap;

use crate::attractor::{AttractorSimulator, TracerPoint};
use crate::config::SiteConfig;

pub const MOBIUS_ATTRACTOR: &str = "mobius-attractor";

/// A live visualization stepped once per animation frame.
pub trait Interactive: Send {
    fn id(&self) -> &'static str;
    fn step(&mut self);
    /// Point cloud to draw, in model space.
    fn points(&self) -> &[TracerPoint];
}

impl Interactive for AttractorSimulator {
    fn id(&self) -> &'static str {
        MOBIUS_ATTRACTOR
    }

    fn step(&mut self) {
        AttractorSimulator::step(self)
    }

    fn points(&self) -> &[TracerPoint] {
        AttractorSimulator::points(self)
    }
}

type Factory = fn(&SiteConfig) -> Box<dyn Interactive>;

fn mount_attractor(config: &SiteConfig) -> Box<dyn Interactive> {
    Box::new(AttractorSimulator::new(config.attractor.clone()))
}

pub struct InteractiveRegistry {
    factories: HashMap<&'static str, Factory>,
}

impl Default for InteractiveRegistry {
    fn default() -> Self {
        let mut r = Self::empty();
        r.register(MOBIUS_ATTRACTOR, mount_attractor);
        r
    }
}

impl InteractiveRegistry {
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register(&mut self, id: &'static str, factory: Factory) {
        self.factories.insert(id, factory);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Build the handler for `id`, or `None` for unknown ids.
    pub fn mount(&self, id: &str, config: &SiteConfig) -> Option<Box<dyn Interactive>> {
        match self.factories.get(id) {
            Some(factory) => Some(factory(config)),
            None => {
                log::debug!("no interactive handler for {:?}", id);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mounts_attractor_by_id() {
        let reg = InteractiveRegistry::default();
        let mut sim = reg.mount(MOBIUS_ATTRACTOR, &SiteConfig::default()).unwrap();
        assert_eq!(sim.id(), MOBIUS_ATTRACTOR);
        sim.step();
        assert!(!sim.points().is_empty());
    }

    #[test]
    fn unknown_id_is_silent_none() {
        let reg = InteractiveRegistry::default();
        assert!(reg.mount("lorenz", &SiteConfig::default()).is_none());
        assert!(!reg.contains("lorenz"));
    }
}
