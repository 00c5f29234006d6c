mod dish;
mod order;

pub use dish::{Dish, DishPatch, NewDish};
pub use order::{Order, OrderedDish};

/// Removes repeated entries while keeping the first occurrence of each.
pub(crate) fn dedup_in_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_in_order_keeps_first() {
        let values = vec!["b".to_string(), "a".into(), "b".into(), "c".into(), "a".into()];
        assert_eq!(dedup_in_order(values), vec!["b", "a", "c"]);
    }
}
