use std::collections::HashSet;

/// Pick the first identifier at or after `candidate` that is not taken.
///
/// Readings created in the same millisecond get consecutive identifiers.
pub fn next_available_id(candidate: i64, taken: &HashSet<i64>) -> i64 {
    let mut id = candidate;
    while taken.contains(&id) {
        id = id.wrapping_add(1);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_candidate_is_used_as_is() {
        let taken = HashSet::from([1, 2, 3]);
        assert_eq!(next_available_id(1_700_000_000_000, &taken), 1_700_000_000_000);
    }

    #[test]
    fn test_collisions_move_to_next_free_id() {
        let taken = HashSet::from([100, 101, 103]);
        assert_eq!(next_available_id(100, &taken), 102);
        assert_eq!(next_available_id(103, &taken), 104);
    }
}
