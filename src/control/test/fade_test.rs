use crate::control::fade::{step_count, Fade, FadeState};
use std::time::Duration;

fn run(mut fade: Fade) -> Vec<i64> {
    let mut levels = vec![];
    while let Some(level) = fade.next_level() {
        levels.push(level);
        assert!(levels.len() < 1_000_000, "Fade doesn't terminate");
    }
    levels
}

#[test]
fn test_step_count() {
    let interval = Duration::from_millis(17);
    assert_eq!(step_count(Duration::from_millis(500), interval), 29);
    assert_eq!(step_count(Duration::from_millis(125), interval), 7);
    assert_eq!(step_count(Duration::from_millis(16), interval), 0);
    assert_eq!(step_count(Duration::from_millis(17), interval), 1);
    assert_eq!(step_count(Duration::from_secs(1), Duration::ZERO), 0);
}

#[test]
fn test_half_to_full_brightness() {
    let mut fade = Fade::new(60000, 120000, 29, 100);
    assert_eq!(fade.state(), FadeState::Idle);
    assert_eq!(fade.step_size(), -2068);

    assert_eq!(fade.next_level(), Some(62068));
    assert_eq!(fade.state(), FadeState::Stepping);
    let rest = run(fade.clone());
    assert_eq!(rest.len(), 28);
    assert_eq!(*rest.last().unwrap(), 119972);

    while fade.next_level().is_some() {}
    assert_eq!(fade.state(), FadeState::Done);
    assert_eq!(fade.difference(), -28);
    assert_eq!(fade.next_level(), None);
}

#[test]
fn test_zero_steps_jumps_to_target() {
    let mut fade = Fade::new(60000, 6000, 0, 100);
    assert_eq!(fade.next_level(), Some(6000));
    assert_eq!(fade.state(), FadeState::Done);
    assert_eq!(fade.difference(), 0);
    assert_eq!(fade.next_level(), None);

    // Even when there's nothing to do, a jump writes the target once
    assert_eq!(run(Fade::new(500, 500, 0, 100)), vec![500]);
}

#[test]
fn test_within_tolerance_does_nothing() {
    let mut fade = Fade::new(60050, 60000, 29, 100);
    assert_eq!(fade.next_level(), None);
    assert_eq!(fade.state(), FadeState::Done);
    assert_eq!(fade.difference(), 50);
}

#[test]
fn test_never_overshoots() {
    // 113 steps leave a remainder above the tolerance with a step size which
    // would jump over the whole tolerance band
    let levels = run(Fade::new(0, 120000, 113, 100));
    let target = 120000;
    assert!(levels.iter().all(|level| *level <= target));
    assert_eq!(*levels.last().unwrap(), target);
}

#[test]
fn test_tiny_step_size_still_progresses() {
    // The difference is smaller than the step count, so the computed step is 0
    let levels = run(Fade::new(1000, 850, 200, 100));
    assert_eq!(levels, (950..=999).rev().collect::<Vec<i64>>());
}

#[test]
fn test_every_target_terminates_within_tolerance() {
    let max_level = 120000;
    for target_percent in 0..=100 {
        let target = target_percent * max_level / 100;
        for current in [0, 1, 999, 60000, 87654, 119999, 120000] {
            for steps in [1, 7, 29, 113, 500] {
                let levels = run(Fade::new(current, target, steps, 100));
                let last = levels.last().copied().unwrap_or(current);
                assert!(
                    (last - target).abs() <= 100,
                    "{} -> {} in {} steps ended at {}",
                    current,
                    target,
                    steps,
                    last
                );
                assert!(levels.len() as u64 <= 2 * steps);
                let (low, high) = (current.min(target), current.max(target));
                assert!(levels.iter().all(|level| (low..=high).contains(level)));
            }
        }
    }
}
