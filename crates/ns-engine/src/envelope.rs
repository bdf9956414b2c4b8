//! Attack/sustain/release envelope over normalized note progress.

/// Latest point the attack may end.
const MAX_ATTACK_END: f64 = 0.95;
/// Earliest point the release may start.
const MIN_RELEASE_START: f64 = 0.05;
/// Floor for attack/release fractions so the ramps never divide by zero.
const MIN_RAMP: f64 = 0.0001;

/// Piecewise-linear envelope gain at `progress` (`0.0..1.0` of the note).
///
/// Ramps up over `[0, attack)`, holds at 1, ramps down over
/// `(1 - release, 1]`. Zero at and outside both ends.
pub fn envelope(progress: f64, attack: f64, release: f64) -> f64 {
    if progress <= 0.0 || progress >= 1.0 {
        return 0.0;
    }
    let attack_end = attack.max(MIN_RAMP).min(MAX_ATTACK_END);
    let release_start = (1.0 - release.max(MIN_RAMP)).max(MIN_RELEASE_START);

    if progress < attack_end {
        return progress / attack_end;
    }
    if progress > release_start {
        return ((1.0 - progress) / (1.0 - release_start)).max(0.0);
    }
    1.0
}
