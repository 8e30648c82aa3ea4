use std::cmp::Ordering;

/// Compares dotted versions numerically (`1.10.0` > `1.9.2`). Each component
/// contributes its leading digits only, so `2.17.1-SNAPSHOT` reads as `2.17.1`.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left = components(left);
    let right = components(right);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn components(version: &str) -> Vec<u64> {
    version
        .trim()
        .trim_start_matches(['v', 'V'])
        .split(['.', '-', '+'])
        .map_while(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_numerically_not_lexically() {
        assert_eq!(compare_versions("1.10.0", "1.9.2"), Ordering::Greater);
        assert_eq!(compare_versions("2.17", "2.17.0"), Ordering::Equal);
        assert_eq!(compare_versions("v3.0.1", "3.0.2"), Ordering::Less);
    }

    #[test]
    fn qualifiers_are_ignored() {
        assert_eq!(compare_versions("2.17.1-SNAPSHOT", "2.17.1"), Ordering::Equal);
        assert_eq!(compare_versions("5.3.20.RELEASE", "5.3.20"), Ordering::Equal);
    }
}
