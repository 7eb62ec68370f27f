//! Fields the server computes instead of accepting from the client.

use crate::recipe::Step;

/// Total cook time: the sum of every step's `duration`, absent counting as 0.
///
/// Values are added as stored; `durationUnit` is not consulted, so a step in
/// seconds contributes its raw number to a total otherwise read as minutes.
pub fn cook_time(steps: &[Step]) -> f64 {
    steps.iter().map(|s| s.duration.unwrap_or(0.0)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::DurationUnit;

    fn step(order: u32, duration: Option<f64>, unit: Option<DurationUnit>) -> Step {
        Step {
            order,
            instruction: format!("step {}", order),
            duration,
            duration_unit: unit,
            temperature: None,
            temperature_unit: None,
            note: None,
        }
    }

    #[test]
    fn test_sums_durations_skipping_absent() {
        let steps = vec![
            step(1, Some(10.0), Some(DurationUnit::Minute)),
            step(2, Some(15.0), Some(DurationUnit::Minute)),
            step(3, None, None),
        ];
        assert_eq!(cook_time(&steps), 25.0);
    }

    #[test]
    fn test_no_durations_is_zero() {
        assert_eq!(cook_time(&[step(1, None, None)]), 0.0);
        assert_eq!(cook_time(&[]), 0.0);
    }

    #[test]
    fn test_units_are_not_converted() {
        // 10 minutes + 30 seconds is reported as 40, not 10.5.
        let steps = vec![
            step(1, Some(10.0), Some(DurationUnit::Minute)),
            step(2, Some(30.0), Some(DurationUnit::Second)),
        ];
        assert_eq!(cook_time(&steps), 40.0);
    }
}
