//! Pricing of vanity patterns.
//!
//! Complexity estimates the expected number of keys to try; lavishness
//! relates a bounty to that work, scaled by 2^32.

const LAVISHNESS_SCALE: f64 = 4_294_967_296.0;

/// Multiplier for the character following the version-constrained first one.
///
/// The value reflects how many network prefixes share the character. `None`
/// keeps the run of leading '1' characters open.
fn second_char_multiplier(c: char) -> Option<f64> {
    match c {
        '1' => None,
        '2'..='6' => Some(23.0),
        '7'..='9' | 'A'..='H' | 'J'..='N' | 'P' => Some(22.0),
        'Q' => Some(65.0),
        'R'..='Z' | 'a'..='k' | 'm'..='z' => Some(1353.0),
        _ => None,
    }
}

/// Expected attempts needed to mine an address starting with `pattern`.
///
/// The first character only picks the network and costs nothing. Each
/// further '1' in the leading run stands for a zero byte and costs 256;
/// every other character costs 58.
pub fn pattern_complexity(pattern: &str) -> f64 {
    let mut chars = pattern.chars();
    if chars.next().is_none() {
        return 0.0;
    }
    let Some(second) = chars.next() else {
        return 1.0;
    };

    let mut complexity = 1.0;
    let mut counting_ones = true;
    match (second, second_char_multiplier(second)) {
        ('1', _) => complexity *= 256.0,
        (_, Some(multiplier)) => {
            complexity *= multiplier;
            counting_ones = false;
        }
        (_, None) => {}
    }

    for c in chars {
        if counting_ones && c == '1' {
            complexity *= 256.0;
        } else {
            complexity *= 58.0;
            counting_ones = false;
        }
    }
    complexity
}

/// `2^32 · bounty / complexity`
#[inline]
pub fn lavishness(bounty: f64, complexity: f64) -> f64 {
    LAVISHNESS_SCALE * bounty / complexity
}

/// Bounty that gives `lavishness` for a pattern of `complexity`.
#[inline]
pub fn bounty(lavishness: f64, complexity: f64) -> f64 {
    lavishness * complexity / LAVISHNESS_SCALE
}

/// Lavishness of offering `bounty` for `pattern`.
pub fn pattern_lavishness(pattern: &str, bounty: f64) -> f64 {
    lavishness(bounty, pattern_complexity(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-9
    }

    #[test]
    fn test_trivial_patterns() {
        assert_eq!(pattern_complexity(""), 0.0);
        assert_eq!(pattern_complexity("1"), 1.0);
        assert_eq!(pattern_complexity("L"), 1.0);
    }

    #[test]
    fn test_second_character_classes() {
        assert_eq!(pattern_complexity("12"), 23.0);
        assert_eq!(pattern_complexity("1A"), 22.0);
        assert_eq!(pattern_complexity("1P"), 22.0);
        assert_eq!(pattern_complexity("1Q"), 65.0);
        assert_eq!(pattern_complexity("1R"), 1353.0);
        assert_eq!(pattern_complexity("1z"), 1353.0);
        assert_eq!(pattern_complexity("11"), 256.0);
    }

    #[test]
    fn test_leading_ones_run() {
        assert_eq!(pattern_complexity("111"), 256.0 * 256.0);
        assert_eq!(pattern_complexity("11A"), 256.0 * 58.0);
        // '1' after the run is an ordinary digit.
        assert_eq!(pattern_complexity("1A1"), 22.0 * 58.0);
        assert_eq!(pattern_complexity("11A1"), 256.0 * 58.0 * 58.0);
    }

    #[test]
    fn test_appending_scales_by_58() {
        for base in ["1Pi", "1Test", "LGW", "1QQ", "1111a"] {
            let longer = format!("{}x", base);
            assert!(close(
                pattern_complexity(&longer),
                58.0 * pattern_complexity(base)
            ));
        }
    }

    #[test]
    fn test_lavishness_inverse() {
        let complexity = pattern_complexity("1Piachu");
        let l = lavishness(0.5, complexity);
        assert!(close(bounty(l, complexity), 0.5));
        assert!(close(pattern_lavishness("1Piachu", 0.5), l));
        assert!(pattern_lavishness("1Piachux", 0.5) < l);
    }

    #[test]
    fn test_lavishness_value() {
        assert_eq!(lavishness(1.0, 4_294_967_296.0), 1.0);
        assert_eq!(bounty(2.0, 1024.0), 2.0 * 1024.0 / LAVISHNESS_SCALE);
    }
}
