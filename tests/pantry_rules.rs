use pantry_api::{
    models::Item,
    pantry::{
        BaselinePolicy, GenerationMode, ListGenerator, ListStatus, Reconciler, StockTier,
        ThresholdPolicy, TransitionError, TrimLowercase, classify_stock, find_exact, find_fuzzy,
        generate_shopping_list, reconcile_purchase,
    },
};

fn stocked(name: &str, current: f64, ideal: f64) -> Item {
    Item::stocked(name, current, Some(ideal))
}

fn bought(name: &str, quantity: f64) -> Item {
    Item::new(name).with_quantity(quantity).completed()
}

fn sample_pantry() -> Vec<Item> {
    vec![
        stocked("Rice", 0.0, 2.0),
        stocked("Salt", 8.0, 10.0),
        stocked("Oil", 1.0, 10.0),
    ]
}

fn names_and_quantities(items: &[Item]) -> Vec<(String, Option<f64>)> {
    items
        .iter()
        .map(|item| (item.name.clone(), item.quantity))
        .collect()
}

#[test]
fn classifier_tiers_follow_ratio_boundaries() {
    assert_eq!(classify_stock(0.0, 10.0).tier, StockTier::OutOfStock);
    assert_eq!(classify_stock(3.0, 10.0).tier, StockTier::Critical);
    assert_eq!(classify_stock(5.0, 10.0).tier, StockTier::Low);
    assert_eq!(classify_stock(10.0, 10.0).tier, StockTier::Ideal);
    assert_eq!(classify_stock(14.0, 10.0).tier, StockTier::Ideal);

    // Exactly 35% is no longer critical.
    let boundary = classify_stock(3.5, 10.0);
    assert_eq!(boundary.ratio, 0.35);
    assert_eq!(boundary.tier, StockTier::Low);
}

#[test]
fn classifier_reports_ratio_and_deficit() {
    let status = classify_stock(3.0, 10.0);
    assert_eq!(status.deficit, 7.0);
    assert!((status.ratio - 0.3).abs() < f64::EPSILON);
    assert!(status.needs_restock());
    assert!(!classify_stock(12.0, 10.0).needs_restock());
}

#[test]
fn classifier_normalizes_missing_and_negative_values() {
    let policy = ThresholdPolicy::default();

    let unset = policy.classify(None, None);
    assert_eq!(unset.tier, StockTier::OutOfStock);
    assert_eq!(unset.deficit, 1.0);

    let zero_ideal = policy.classify(Some(2.0), Some(0.0));
    assert_eq!(zero_ideal.ratio, 2.0);
    assert_eq!(zero_ideal.tier, StockTier::Ideal);

    let negative = policy.classify(Some(-4.0), Some(-1.0));
    assert_eq!(negative.tier, StockTier::OutOfStock);
    assert_eq!(negative.ratio, 0.0);
    assert_eq!(negative.deficit, 1.0);
}

#[test]
fn custom_threshold_moves_the_critical_boundary() {
    let policy = ThresholdPolicy::new(0.5);
    assert_eq!(policy.classify(Some(4.0), Some(10.0)).tier, StockTier::Critical);
    assert_eq!(policy.classify(Some(5.0), Some(10.0)).tier, StockTier::Low);

    let generated = ListGenerator::new(policy).generate(
        &[stocked("Flour", 4.0, 10.0)],
        GenerationMode::Critical,
    );
    assert_eq!(names_and_quantities(&generated), vec![("Flour".to_string(), Some(6.0))]);
}

#[test]
fn critical_mode_only_picks_empty_and_critical_items() {
    let generated = generate_shopping_list(&sample_pantry(), GenerationMode::Critical);

    assert_eq!(
        names_and_quantities(&generated),
        vec![
            ("Rice".to_string(), Some(2.0)),
            ("Oil".to_string(), Some(9.0)),
        ]
    );
}

#[test]
fn all_mode_picks_everything_under_ideal_in_pantry_order() {
    let generated = generate_shopping_list(&sample_pantry(), GenerationMode::All);

    assert_eq!(
        names_and_quantities(&generated),
        vec![
            ("Rice".to_string(), Some(2.0)),
            ("Salt".to_string(), Some(2.0)),
            ("Oil".to_string(), Some(9.0)),
        ]
    );
}

#[test]
fn generated_items_are_clean_shopping_records() {
    let pantry = vec![stocked("Coffee", 0.0, 3.0).with_category(Some("Breakfast".into()))];
    let generated = generate_shopping_list(&pantry, GenerationMode::All);

    assert_eq!(generated.len(), 1);
    let item = &generated[0];
    assert_ne!(item.id, pantry[0].id);
    assert_eq!(item.category.as_deref(), Some("Breakfast"));
    assert!(!item.completed);
    assert_eq!(item.current_quantity, None);
    assert_eq!(item.ideal_quantity, None);
}

#[test]
fn generator_skips_items_at_or_above_ideal() {
    let pantry = vec![stocked("Sugar", 5.0, 5.0), stocked("Tea", 9.0, 3.0)];
    assert!(generate_shopping_list(&pantry, GenerationMode::All).is_empty());
    assert!(generate_shopping_list(&pantry, GenerationMode::Critical).is_empty());
}

#[test]
fn generator_does_not_mutate_its_input() {
    let pantry = sample_pantry();
    let snapshot = pantry.clone();

    let first = generate_shopping_list(&pantry, GenerationMode::All);
    let second = generate_shopping_list(&pantry, GenerationMode::All);

    assert_eq!(pantry, snapshot);
    assert_eq!(names_and_quantities(&first), names_and_quantities(&second));
    assert_eq!(
        first.iter().map(|i| i.category.clone()).collect::<Vec<_>>(),
        second.iter().map(|i| i.category.clone()).collect::<Vec<_>>()
    );
}

#[test]
fn empty_pantry_generates_nothing() {
    assert!(generate_shopping_list(&[], GenerationMode::Critical).is_empty());
    assert!(generate_shopping_list(&[], GenerationMode::All).is_empty());
}

#[test]
fn purchase_adds_to_matching_pantry_entry() {
    let milk = Item {
        current_quantity: Some(1.0),
        ideal_quantity: Some(4.0),
        ..Item::new("Milk").with_category(Some("Dairy".into()))
    };
    let pantry = vec![milk.clone()];

    let updated = reconcile_purchase(&[bought(" milk ", 2.0)], &pantry);

    assert_eq!(updated.len(), 1);
    let entry = &updated[0];
    assert_eq!(entry.current_quantity, Some(3.0));
    assert_eq!(entry.id, milk.id);
    assert_eq!(entry.name, "Milk");
    assert_eq!(entry.category.as_deref(), Some("Dairy"));
    assert_eq!(entry.ideal_quantity, Some(4.0));
}

#[test]
fn purchase_of_unknown_item_creates_baseline_entry() {
    let pantry = vec![stocked("Rice", 1.0, 2.0)];
    let eggs = bought("Eggs", 12.0).with_category(Some("Protein".into()));

    let updated = reconcile_purchase(&[eggs.clone()], &pantry);

    assert_eq!(updated.len(), 2);
    assert_eq!(updated[0], pantry[0]);
    let created = &updated[1];
    assert_ne!(created.id, eggs.id);
    assert_eq!(created.name, "Eggs");
    assert_eq!(created.category.as_deref(), Some("Protein"));
    assert_eq!(created.current_quantity, Some(12.0));
    assert_eq!(created.ideal_quantity, Some(12.0));
    assert!(!created.completed);
}

#[test]
fn duplicate_lines_in_one_purchase_collapse_into_one_entry() {
    let purchase = vec![bought("Tomato", 1.0), bought("  TOMATO", 2.0)];

    let result = Reconciler::new().reconcile(&purchase, &[]);

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].name, "Tomato");
    assert_eq!(result.items[0].current_quantity, Some(3.0));
    assert_eq!(result.created, 1);
    assert_eq!(result.matched, 1);
}

#[test]
fn missing_quantities_fall_back_to_defaults() {
    let pantry = vec![Item {
        current_quantity: None,
        ..Item::new("Bread")
    }];
    let purchase = vec![Item {
        quantity: None,
        ..Item::new("bread").completed()
    }];

    let updated = reconcile_purchase(&purchase, &pantry);
    assert_eq!(updated[0].current_quantity, Some(1.0));
}

#[test]
fn purchase_restocks_from_zero_when_stored_stock_is_negative() {
    let pantry = vec![stocked("Milk", -3.0, 4.0)];

    let updated = reconcile_purchase(&[bought("milk", 2.0)], &pantry);

    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].current_quantity, Some(2.0));
    assert_eq!(updated[0].ideal_quantity, Some(4.0));
    let status = ThresholdPolicy::default()
        .classify(updated[0].current_quantity, updated[0].ideal_quantity);
    assert_eq!(status.tier, StockTier::Low);
}

#[test]
fn only_completed_lines_are_merged() {
    let pantry = vec![stocked("Butter", 1.0, 2.0)];
    let purchase = vec![
        Item::new("Butter").with_quantity(5.0),
        bought("Jam", 1.0),
    ];

    let updated = reconcile_purchase(&purchase, &pantry);

    assert_eq!(updated.len(), 2);
    assert_eq!(updated[0].current_quantity, Some(1.0));
    assert_eq!(updated[1].name, "Jam");
}

#[test]
fn empty_purchase_leaves_pantry_unchanged() {
    let pantry = sample_pantry();

    assert_eq!(reconcile_purchase(&[], &pantry), pantry);

    let unchecked = vec![Item::new("Rice").with_quantity(3.0)];
    let result = Reconciler::new().reconcile(&unchecked, &pantry);
    assert!(result.is_noop());
    assert_eq!(result.items, pantry);
}

#[test]
fn reconciling_twice_counts_twice() {
    let pantry = vec![stocked("Oil", 1.0, 2.0)];
    let purchase = vec![bought("Oil", 1.0)];

    let once = reconcile_purchase(&purchase, &pantry);
    let twice = reconcile_purchase(&purchase, &once);

    assert_eq!(twice[0].current_quantity, Some(3.0));
    assert_eq!(pantry[0].current_quantity, Some(1.0));
}

#[test]
fn unset_baseline_leaves_ideal_empty() {
    let result = Reconciler::new()
        .baseline(BaselinePolicy::Unset)
        .reconcile(&[bought("Yeast", 3.0)], &[]);

    assert_eq!(result.items[0].current_quantity, Some(3.0));
    assert_eq!(result.items[0].ideal_quantity, None);
}

#[test]
fn reconciler_accepts_a_custom_normalizer() {
    let strip_accents = |name: &str| {
        name.trim()
            .to_lowercase()
            .replace(['á', 'ã', 'â'], "a")
            .replace('ç', "c")
    };
    let pantry = vec![stocked("Açúcar", 1.0, 2.0), stocked("Feijão", 0.0, 2.0)];

    let result = Reconciler::with_normalizer(strip_accents)
        .reconcile(&[bought("feijao", 2.0)], &pantry);

    assert_eq!(result.matched, 1);
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.items[1].current_quantity, Some(2.0));

    // The default policy keeps accented and plain spellings apart.
    assert_eq!(reconcile_purchase(&[bought("feijao", 2.0)], &pantry).len(), 3);
}

#[test]
fn exact_matching_never_falls_back_to_substrings() {
    let pantry = vec![stocked("Coconut milk", 1.0, 2.0)];
    assert_eq!(find_exact(&pantry, "milk", &TrimLowercase), None);

    let updated = reconcile_purchase(&[bought("Milk", 1.0)], &pantry);
    assert_eq!(updated.len(), 2);
}

#[test]
fn fuzzy_lookup_tries_exact_then_contains_then_reverse_contains() {
    let pantry = vec![
        stocked("Whole milk", 1.0, 2.0),
        stocked("Milk", 1.0, 2.0),
        stocked("Rice", 1.0, 2.0),
    ];

    assert_eq!(find_fuzzy(&pantry, " MILK ", &TrimLowercase), Some(1));
    assert_eq!(find_fuzzy(&pantry, "whole", &TrimLowercase), Some(0));
    assert_eq!(find_fuzzy(&pantry, "brown rice 5kg", &TrimLowercase), Some(2));
    assert_eq!(find_fuzzy(&pantry, "pasta", &TrimLowercase), None);
    assert_eq!(find_fuzzy(&pantry, "   ", &TrimLowercase), None);
}

#[test]
fn list_status_transitions() {
    let active = ListStatus::from_archived(false);
    assert_eq!(active.ensure_mutable(), Ok(()));
    assert_eq!(active.restore(), Err(TransitionError::NotArchived));

    let archived = active.archive().expect("archive active list");
    assert!(archived.is_archived());
    assert_eq!(archived.ensure_mutable(), Err(TransitionError::ReadOnly));
    assert_eq!(archived.archive(), Err(TransitionError::AlreadyArchived));
    assert_eq!(archived.restore(), Ok(ListStatus::Active));
}
