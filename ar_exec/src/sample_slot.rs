//! # Sample Slot
//!
//! Holds the latest navigation sample. The producer (the channel processor) and the consumer
//! (pose control, once per frame) each own a clone of the slot. A submit swaps the whole sample
//! in one go so a reader only ever sees a complete sample, old or new.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::sync::{Arc, RwLock};

use comms_if::nav::NavSample;
use log::trace;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Shared, last-write-wins holder of the current navigation sample.
#[derive(Debug, Clone, Default)]
pub struct SampleSlot {
    current: Arc<RwLock<Option<Arc<NavSample>>>>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SampleSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current sample.
    pub fn submit(&self, sample: NavSample) {
        trace!("New navigation sample: {:?}", sample);

        let sample = Arc::new(sample);

        // A poisoned lock still holds a whole sample, so recover it
        match self.current.write() {
            Ok(mut c) => *c = Some(sample),
            Err(poisoned) => *poisoned.into_inner() = Some(sample),
        }
    }

    /// Get the current sample, or `None` if none has been submitted yet.
    pub fn latest(&self) -> Option<Arc<NavSample>> {
        match self.current.read() {
            Ok(c) => c.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    fn sample(distance_m: f64) -> NavSample {
        NavSample {
            distance_m,
            bearing_deg: distance_m,
            instruction: format!("step {}", distance_m),
            is_final_step: false,
        }
    }

    #[test]
    fn test_last_write_wins() {
        let producer = SampleSlot::new();
        let consumer = producer.clone();

        assert!(consumer.latest().is_none());

        producer.submit(sample(10.0));
        producer.submit(sample(20.0));

        assert_eq!(*consumer.latest().unwrap(), sample(20.0));

        // A sample held by the consumer is unaffected by later submits
        let held = consumer.latest().unwrap();
        producer.submit(sample(30.0));
        assert_eq!(held.distance_m, 20.0);
        assert_eq!(consumer.latest().unwrap().distance_m, 30.0);

    }

    #[test]
    fn test_concurrent_submit_is_whole_value() {
        let slot = SampleSlot::new();
        let producer = slot.clone();

        let handle = thread::spawn(move || {
            for i in 0..1000 {
                producer.submit(sample(i as f64));
            }
        });

        for _ in 0..1000 {
            if let Some(s) = slot.latest() {
                // All fields come from the same submit
                assert_eq!(s.distance_m, s.bearing_deg);
                assert_eq!(s.instruction, format!("step {}", s.distance_m));
            }
        }

        handle.join().unwrap();
        assert_eq!(slot.latest().unwrap().distance_m, 999.0);
    }
}
