//! Platform contact tracking
//!
//! Whatever physics backend sits underneath only has to report contact
//! begin/end events for colliders it can classify through [`Surface`].
//! The counter tallies overlapping platform contacts so that stepping off one
//! platform while still standing on another keeps the player grounded.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Capability a collider exposes to contact consumers
pub trait Surface {
    /// Colliders the player can stand on
    fn is_platform(&self) -> bool;

    /// The player's own collider (used by trigger volumes)
    fn is_player(&self) -> bool {
        false
    }
}

/// Collider classification for level geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderTag {
    Platform,
    Wall,
    Hazard,
    Trigger,
    Player,
}

impl Surface for ColliderTag {
    fn is_platform(&self) -> bool {
        matches!(self, ColliderTag::Platform)
    }

    fn is_player(&self) -> bool {
        matches!(self, ColliderTag::Player)
    }
}

/// A collision callback, decoupled from any particular engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactEvent<S> {
    Begin(S),
    End(S),
}

/// Anything that can hand over the contact events gathered since the last poll
pub trait ContactSource {
    type Collider: Surface;

    fn drain_contacts(&mut self) -> Vec<ContactEvent<Self::Collider>>;
}

/// Simple FIFO of contact events, filled by a physics step or a test
#[derive(Debug, Clone)]
pub struct ContactQueue<S> {
    events: VecDeque<ContactEvent<S>>,
}

impl<S> Default for ContactQueue<S> {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }
}

impl<S> ContactQueue<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, collider: S) {
        self.events.push_back(ContactEvent::Begin(collider));
    }

    pub fn end(&mut self, collider: S) {
        self.events.push_back(ContactEvent::End(collider));
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<S: Surface> ContactSource for ContactQueue<S> {
    type Collider = S;

    fn drain_contacts(&mut self) -> Vec<ContactEvent<S>> {
        self.events.drain(..).collect()
    }
}

/// Number of platform colliders currently touching the player.
///
/// An `End` without a matching `Begin` (a missed callback) is floored at zero
/// and logged rather than wrapping or going negative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactCounter {
    count: u32,
    /// Unmatched exits seen so far
    dropped_exits: u32,
}

impl ContactCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_contact_begin(&mut self, other: &impl Surface) {
        if other.is_platform() {
            self.count += 1;
        }
    }

    pub fn on_contact_end(&mut self, other: &impl Surface) {
        if !other.is_platform() {
            return;
        }
        if self.count == 0 {
            self.dropped_exits += 1;
            log::warn!("Platform contact ended with no contacts recorded, ignoring");
            return;
        }
        self.count -= 1;
    }

    pub fn apply<S: Surface>(&mut self, event: &ContactEvent<S>) {
        match event {
            ContactEvent::Begin(other) => self.on_contact_begin(other),
            ContactEvent::End(other) => self.on_contact_end(other),
        }
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        self.count > 0
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn dropped_exits(&self) -> u32 {
        self.dropped_exits
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Collider type from some other engine
    struct Ledge {
        solid: bool,
    }

    impl Surface for Ledge {
        fn is_platform(&self) -> bool {
            self.solid
        }
    }

    #[test]
    fn test_overlapping_platforms_stay_grounded() {
        let a = Ledge { solid: true };
        let b = Ledge { solid: true };
        let mut counter = ContactCounter::new();

        counter.on_contact_begin(&a);
        counter.on_contact_begin(&b);
        counter.on_contact_end(&a);
        assert!(counter.grounded());
        assert_eq!(counter.count(), 1);

        counter.on_contact_end(&b);
        assert!(!counter.grounded());
    }

    #[test]
    fn test_non_platform_contacts_ignored() {
        let mut counter = ContactCounter::new();
        counter.on_contact_begin(&ColliderTag::Wall);
        counter.on_contact_begin(&ColliderTag::Hazard);
        counter.on_contact_begin(&Ledge { solid: false });
        assert!(!counter.grounded());

        counter.on_contact_begin(&ColliderTag::Platform);
        counter.on_contact_end(&ColliderTag::Wall);
        assert!(counter.grounded());
    }

    #[test]
    fn test_unmatched_exit_is_floored() {
        let mut counter = ContactCounter::new();
        counter.on_contact_end(&ColliderTag::Platform);
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.dropped_exits(), 1);

        counter.on_contact_begin(&ColliderTag::Platform);
        assert!(counter.grounded());
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut queue = ContactQueue::new();
        queue.begin(ColliderTag::Platform);
        queue.end(ColliderTag::Platform);
        let events = queue.drain_contacts();
        assert_eq!(
            events,
            vec![
                ContactEvent::Begin(ColliderTag::Platform),
                ContactEvent::End(ColliderTag::Platform)
            ]
        );
        assert!(queue.is_empty());
    }

    proptest! {
        #[test]
        fn prop_grounded_matches_net_balance(events in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..64)) {
            // Only generate exits that have a matching enter, like a well-behaved engine
            let mut counter = ContactCounter::new();
            let mut net: u32 = 0;
            for (begin, platform) in events {
                let tag = if platform { ColliderTag::Platform } else { ColliderTag::Wall };
                if begin {
                    counter.apply(&ContactEvent::Begin(tag));
                    if platform { net += 1; }
                } else if !platform || net > 0 {
                    counter.apply(&ContactEvent::End(tag));
                    if platform { net -= 1; }
                }
                prop_assert_eq!(counter.grounded(), net > 0);
                prop_assert_eq!(counter.count(), net);
            }
            prop_assert_eq!(counter.dropped_exits(), 0);
        }
    }
}
