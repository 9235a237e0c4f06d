//! Speed boost power-up: Idle -> Active -> Cooldown -> Idle.

use protocol::BoostView;

/// Power-up state machine, counted down in virtual milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boost {
    #[default]
    Idle,
    Active { remaining_ms: u64 },
    Cooldown { remaining_ms: u64 },
}

impl Boost {
    /// Start the boost. Returns false (state unchanged) unless idle.
    pub fn activate(&mut self, duration_ms: u64) -> bool {
        if *self != Boost::Idle {
            return false;
        }
        *self = Boost::Active {
            remaining_ms: duration_ms,
        };
        true
    }

    /// Count down by `dt_ms`, moving to the next state when a window runs out.
    pub fn advance(&mut self, dt_ms: u64, cooldown_ms: u64) {
        *self = match *self {
            Boost::Idle => Boost::Idle,
            Boost::Active { remaining_ms } if remaining_ms > dt_ms => Boost::Active {
                remaining_ms: remaining_ms - dt_ms,
            },
            Boost::Active { .. } => Boost::Cooldown {
                remaining_ms: cooldown_ms,
            },
            Boost::Cooldown { remaining_ms } if remaining_ms > dt_ms => Boost::Cooldown {
                remaining_ms: remaining_ms - dt_ms,
            },
            Boost::Cooldown { .. } => Boost::Idle,
        };
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Boost::Active { .. })
    }

    /// `boosted` while active, 1 otherwise.
    #[inline]
    pub fn speed_multiplier(&self, boosted: f64) -> f64 {
        if self.is_active() { boosted } else { 1.0 }
    }

    pub fn view(&self) -> BoostView {
        match *self {
            Boost::Idle => BoostView::Idle,
            Boost::Active { remaining_ms } => BoostView::Active { remaining_ms },
            Boost::Cooldown { remaining_ms } => BoostView::Cooldown { remaining_ms },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_from_idle() {
        let mut boost = Boost::Idle;
        assert!(boost.activate(3000));
        assert_eq!(boost, Boost::Active { remaining_ms: 3000 });
        assert_eq!(boost.speed_multiplier(2.0), 2.0);
    }

    #[test]
    fn test_second_activation_rejected() {
        let mut boost = Boost::Idle;
        boost.activate(3000);
        boost.advance(500, 8000);
        assert!(!boost.activate(3000));
        assert_eq!(boost, Boost::Active { remaining_ms: 2500 });
    }

    #[test]
    fn test_full_cycle() {
        let mut boost = Boost::Idle;
        boost.activate(300);
        for _ in 0..3 {
            boost.advance(100, 800);
        }
        assert_eq!(boost, Boost::Cooldown { remaining_ms: 800 });
        assert_eq!(boost.speed_multiplier(2.0), 1.0);
        assert!(!boost.activate(300));

        for _ in 0..8 {
            boost.advance(100, 800);
        }
        assert_eq!(boost, Boost::Idle);
        assert!(boost.activate(300));
    }
}
