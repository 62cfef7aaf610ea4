/// Store locations tracked on the Store Counts sheet, in reference order.
pub const ALL_STORES: &[&str] = &[
    "Jenkins",
    "Neon",
    "Harlan 1",
    "Harlan 2",
    "Hyden",
    "PMM",
    "Isom",
    "Whitesburg",
    "Hazard 2",
    "Ermine",
    "Hindman 2",
    "Hindman 1",
    "Martin",
    "Jackson",
    "Hazard 3",
    "Dryfork",
    "Pound",
    "Catnip (Nicholasville)",
    "Marrowbone",
    "Elkhorn City",
    "Chloe",
    "Caney",
    "Belfrey",
    "Phelps",
    "Virgie",
    "Harold",
    "Allen",
    "Goody",
    "Zebulon",
    "Pikeville",
    "South",
    "North",
    "Prestonsburg 1",
    "Ivel",
    "Justiceville",
    "Salyersville",
    "Grundy",
    "West Liberty",
    "Prestonsburg 2",
    "Prestonsburg 3",
];

/// Case-insensitive substring match of a store name inside a requester.
pub fn requester_matches(requester: &str, store: &str) -> bool {
    requester.to_lowercase().contains(&store.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_list_has_forty_distinct_stores() {
        let mut names: Vec<&str> = ALL_STORES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 40);
        assert_eq!(ALL_STORES.len(), 40);
    }

    #[test]
    fn matching_ignores_case_and_position() {
        assert!(requester_matches("JENKINS store manager", "Jenkins"));
        assert!(requester_matches("Manager - Catnip (Nicholasville)", "Catnip (Nicholasville)"));
        assert!(!requester_matches("Hazard 1 Store", "Hazard 2"));
    }

    #[test]
    fn overlapping_names_both_match() {
        assert!(requester_matches("South Williamson", "South"));
        assert!(requester_matches("Harlan 12", "Harlan 1"));
    }
}
