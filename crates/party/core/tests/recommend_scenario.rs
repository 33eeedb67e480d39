use party_core::{
    CanonicalSpelling, Character, Element, IdentityResolver, Mode, PartySelector, RawRequest,
    Rarity, RecommendationRequest, Role, Roster, SpellingTable, recommend,
};

fn five_character_roster() -> Roster {
    Roster::from_characters(vec![
        Character::new("ember", "Ember")
            .with_rarity(Rarity::Sr)
            .with_element(Element::Fire)
            .with_role(Role::Debuffer),
        Character::new("gale", "Gale")
            .with_rarity(Rarity::Ssr)
            .with_element(Element::Wind)
            .with_role(Role::Dps),
        Character::new("frost", "Frost")
            .with_rarity(Rarity::R)
            .with_element(Element::Ice)
            .with_role(Role::Tank),
        Character::new("seraph", "Seraph")
            .with_rarity(Rarity::Ssr)
            .with_element(Element::Holy)
            .with_role(Role::Healer)
            .with_alias("Sera"),
        Character::new("umbra", "Umbra")
            .with_rarity(Rarity::Sr)
            .with_element(Element::Chaos)
            .with_role(Role::Buffer),
    ])
    .expect("roster should be valid")
}

/// Boss fight end to end:
/// 1. All five characters owned, Gale banned, Frost required
/// 2. Boss weak to Fire
/// 3. Frost is seated first, the rest fill by score
#[test]
fn test_boss_scenario_end_to_end() {
    let roster = five_character_roster();

    // ================================================================
    // PHASE 1: Request
    // ================================================================
    let request = RecommendationRequest::new(Mode::Boss)
        .owned(["Ember", "GALE", "frost", "Sera", "umbra"])
        .banned(["gale"])
        .required(["Frost"])
        .boss_weakness(Element::Fire);

    // ================================================================
    // PHASE 2: Recommendation
    // ================================================================
    let result = recommend(&request, &roster);

    assert!(result.ok, "pool of four should succeed: {:?}", result.issues);
    assert!(result.issues.is_empty());
    assert_eq!(result.mode, Mode::Boss);
    assert_eq!(result.input.owned, ["ember", "gale", "frost", "seraph", "umbra"]);
    assert_eq!(result.input.banned, ["gale"]);

    // ================================================================
    // PHASE 3: Party shape
    // ================================================================
    let party = result.party();
    let ids: Vec<&str> = party.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["frost", "ember", "seraph", "umbra"]);
    assert!(party[0].required);
    assert!(!ids.contains(&"gale"));

    // Fire member: SR base + weakness + boss debuffer bonus.
    let ember = &party[1];
    assert_eq!(ember.score, 18 + 25 + 6);
    assert_eq!(ember.breakdown.element, 25);

    let best = result.best_party.as_ref().expect("best party present");
    assert_eq!(best.party_size, 4);
    assert_eq!(best.total_score, 10 + 49 + 30 + 24);
    assert_eq!(best.analysis, ["boss weakness (Fire) matched: 1/4"]);
}

#[test]
fn test_enemy_element_cycle_in_scores() {
    let roster = five_character_roster();
    let request = RecommendationRequest::new(Mode::Pve)
        .owned(["ember", "gale", "frost", "seraph", "umbra"])
        .enemy_element(Element::Ice);
    let result = recommend(&request, &roster);

    let score_of = |id: &str| {
        result
            .party()
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.breakdown.element)
    };
    // Wind beats Ice, Ice beats Holy.
    assert_eq!(score_of("gale"), Some(20));
    assert_eq!(score_of("seraph"), Some(-10));
}

#[test]
fn test_required_and_banned_conflict() {
    let roster = five_character_roster();
    let request = RecommendationRequest::default()
        .owned(["ember", "gale", "frost", "seraph", "umbra"])
        .required(["seraph"])
        .banned(["Seraph"]);
    let result = recommend(&request, &roster);

    assert!(result.ok);
    assert!(result.has_issue("required_not_in_pool"));
    assert!(result.party().iter().all(|m| m.id != "seraph"));
}

#[test]
fn test_unknown_owned_tokens_never_reach_the_pool() {
    let roster = five_character_roster();
    let request = RecommendationRequest::default().owned(["ember", "gale", "frost", "Nobody"]);
    let result = recommend(&request, &roster);

    assert!(!result.ok);
    assert!(result.has_issue("pool_too_small"));
    assert!(result.has_issue("unknown_character"));
    assert_eq!(result.input.owned, ["ember", "gale", "frost", "nobody"]);
}

#[test]
fn test_recommend_is_deterministic() {
    let roster = five_character_roster();
    let request = RecommendationRequest::new(Mode::Pvp)
        .owned(["umbra", "seraph", "frost", "gale", "ember"])
        .focus(["gale"])
        .enemy_element(Element::Chaos);

    let first = recommend(&request, &roster);
    for _ in 0..10 {
        assert_eq!(recommend(&request, &roster), first);
    }
}

#[test]
fn test_payload_path_matches_typed_path() {
    let roster = five_character_roster();
    let raw = RawRequest {
        mode: Some("Boss".into()),
        owned: Some(vec![
            "ember".into(),
            "gale".into(),
            "frost".into(),
            "seraph".into(),
            "umbra".into(),
        ]),
        boss_weakness: Some("fire".into()),
        ..RawRequest::default()
    };
    let typed = RecommendationRequest::new(Mode::Boss)
        .owned(["ember", "gale", "frost", "seraph", "umbra"])
        .boss_weakness(Element::Fire);

    let selector = PartySelector::default();
    assert_eq!(
        selector.recommend_payload(raw, &roster),
        selector.recommend(&typed, &roster)
    );
}

#[test]
fn test_historical_spellings_resolve_to_one_character() {
    let spellings = SpellingTable::new([CanonicalSpelling {
        id: "jeannedarc".into(),
        name: "Jeanne D Arc".into(),
        variants: vec![
            "Jeanne D'Arc".into(),
            "Joan of Arc".into(),
            "joan-of-arc".into(),
        ],
    }]);
    let roster = Roster::builder()
        .spellings(spellings)
        .with(Character::new("joan-of-arc", "Joan of Arc").with_rarity(Rarity::Ssr))
        .with(Character::new("jeanne", "Jeanne D'Arc"))
        .with(Character::new("nina", "Nina"))
        .build();

    assert_eq!(roster.len(), 2);
    let jeanne = roster.get("jeannedarc").expect("canonical entry");
    assert_eq!(jeanne.name, "Jeanne D Arc");
    assert_eq!(jeanne.rarity, Rarity::Ssr);

    let resolver = IdentityResolver::new(&roster);
    assert_eq!(
        resolver.resolve(&["Joan of Arc", "JEANNE D'ARC", "jeannedarc", "joan-of-arc", "Nina"]),
        ["jeannedarc", "nina"]
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_response_json_is_byte_identical() {
    let roster = five_character_roster();
    let request = RecommendationRequest::new(Mode::Boss)
        .owned(["ember", "gale", "frost", "seraph", "umbra"])
        .required(["frost"])
        .boss_weakness(Element::Fire);

    let first = serde_json::to_string(&recommend(&request, &roster)).expect("serializable");
    let second = serde_json::to_string(&recommend(&request, &roster)).expect("serializable");
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).expect("valid json");
    assert_eq!(value["ok"], true);
    assert_eq!(value["mode"], "boss");
    assert_eq!(value["best_party"]["party_size"], 4);
    assert_eq!(value["best_party"]["members"][0]["id"], "frost");
    assert_eq!(value["best_party"]["members"][1]["element"], "Fire");
}
