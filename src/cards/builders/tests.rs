use super::*;
use crate::ability::TriggerEvent;
use crate::cost::CostKind;
use crate::effect::{Condition, Join, PreventedAction};
use crate::target::{Controller, ObjectKind};
use crate::types::Resource;

fn parse(name: &str, card_type: CardType, sections: &[&str]) -> Vec<AbilityDefinition> {
    parse_text_sections(CardId::from_raw(42), name, card_type, sections)
}

fn only_effect(text: &str) -> Effect {
    let mut effects = parse_effect_text(text);
    assert_eq!(effects.len(), 1, "expected one effect for '{text}': {effects:?}");
    effects.remove(0)
}

#[test]
fn test_normalize_glyphs_and_brace_aliases() {
    assert_eq!(normalize_text("⟳ — Gain 1 ◊."), "{E} — Gain 1 {L}.");
    assert_eq!(normalize_text("{exert}, 2 {i} – Draw a card."), "{E}, 2 {I} — Draw a card.");
    assert_eq!(normalize_text("Pay 3 ⬡ to give ¤ and ⛉"), "Pay 3 {I} to give {S} and {W}");
    assert_eq!(normalize_text("Keep {X} as printed"), "Keep {X} as printed");
}

#[test]
fn test_normalize_line_breaks_quotes_and_dashes() {
    assert_eq!(
        normalize_text("Whenever he quests,\\nyou may draw a card.\n"),
        "Whenever he quests, you may draw a card."
    );
    assert_eq!(normalize_text("can’t  be\u{a0}challenged"), "can't be challenged");
    assert_eq!(normalize_text("{E} -- Draw a card."), "{E} — Draw a card.");
    assert_eq!(normalize_text("{E} - Draw a card."), "{E} — Draw a card.");
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize_text("⟳, 1 ⬡ – Chosen character gets +2 ¤ this turn.\\n");
    assert_eq!(normalize_text(&once), once);
}

#[test]
fn test_replace_self_name_skips_named_references() {
    assert_eq!(
        replace_self_name(
            "When you play Ariel, chosen character named Ariel gets +1 {S}.",
            "Ariel",
            "this character"
        ),
        "When you play this character, chosen character named Ariel gets +1 {S}."
    );
    assert_eq!(
        replace_self_name("Arielle quests", "Ariel", "this character"),
        "Arielle quests"
    );
}

#[test]
fn test_tokenizer_keeps_printed_words_and_glyphs() {
    let tokens = tokenize_clause("Can't be challenged, opponent's 2 {I}.");
    assert_eq!(
        words(&tokens),
        vec!["cant", "be", "challenged", "opponents", "2"]
    );
    assert_eq!(tokens[0].as_raw_word(), Some("Can't"));
    assert!(matches!(tokens[3], Token::Comma(_)));
    assert_eq!(tokens[6].as_symbol(), Some(Glyph::Ink));
    assert!(matches!(tokens.last(), Some(Token::Period(_))));
    assert_eq!(phrase_text(&tokens[..3]), "Can't be challenged");
}

#[test]
fn test_leading_caps_name() {
    let text = "I'M STUCK! Whenever this character quests, draw a card.";
    let end = leading_caps_name(text).expect("caps name");
    assert_eq!(&text[..end], "I'M STUCK!");
    assert_eq!(leading_caps_name("A character with Evasive"), None);
    assert_eq!(leading_caps_name("{E} — Draw a card."), None);
    assert_eq!(leading_caps_name("ALL CAPS"), None);

    let inner = "TAKE A BOW Whenever this character quests, draw a card.";
    assert_eq!(leading_caps_name(inner).map(|end| &inner[..end]), Some("TAKE A BOW"));
    let trailing = "GET READY A character with Evasive gets +1 {S}.";
    assert_eq!(leading_caps_name(trailing).map(|end| &trailing[..end]), Some("GET READY"));
}

#[test]
fn test_segment_splits_keyword_from_named_ability() {
    let units = segment_sections(&[
        "Bodyguard (This character may enter play exerted.) GUARD DUTY Whenever this character quests, draw a card.",
    ]);
    assert_eq!(
        units,
        vec![
            "Bodyguard (This character may enter play exerted.)".to_string(),
            "GUARD DUTY Whenever this character quests, draw a card.".to_string(),
        ]
    );
}

#[test]
fn test_segment_splits_two_named_abilities_in_one_section() {
    let units = segment_sections(&[
        "RISE UP Whenever this character quests, gain 1 lore. HOLD FAST This character can't be challenged.",
    ]);
    assert_eq!(units.len(), 2);
    assert_eq!(units[0], "RISE UP Whenever this character quests, gain 1 lore.");
    assert_eq!(units[1], "HOLD FAST This character can't be challenged.");
}

#[test]
fn test_segment_drops_empty_sections() {
    let units = segment_sections(&["", "   ", "Evasive"]);
    assert_eq!(units, vec!["Evasive".to_string()]);
}

#[test]
fn test_segment_keeps_reminder_periods_inside_parentheses() {
    let units = segment_sections(&["Ward (Opponents can't choose this character. NOT A NAME here.)"]);
    assert_eq!(units.len(), 1);
}

#[test]
fn test_classify_activated_splits_at_top_level_dash() {
    let unit = classify("STRAIGHTEN HAIR {E} — Remove up to 1 damage from chosen character.");
    assert_eq!(unit.category, AbilityCategory::Activated);
    assert_eq!(unit.name.as_deref(), Some("STRAIGHTEN HAIR"));
    assert_eq!(unit.cost_clause.as_deref(), Some("{E}"));
    assert_eq!(unit.effect_clause, "Remove up to 1 damage from chosen character.");
}

#[test]
fn test_classify_ignores_dash_inside_parentheses() {
    let unit = classify("WIND UP (Pay 1 {I} — then this) This character gets +1 {S}.");
    assert_eq!(unit.category, AbilityCategory::Static);
    assert_eq!(unit.cost_clause, None);
    assert_eq!(unit.name.as_deref(), Some("WIND UP"));
}

#[test]
fn test_classify_triggered_with_once_per_turn() {
    let unit = classify("Once per turn, when this character is challenged, draw a card.");
    assert_eq!(unit.category, AbilityCategory::Triggered);
    assert!(unit.once_per_turn);
    assert_eq!(unit.name, None);
    assert_eq!(unit.lead_clause.as_deref(), Some("when this character is challenged"));
    assert_eq!(unit.effect_clause, "draw a card.");
}

#[test]
fn test_classify_title_case_name_before_lead_word() {
    let unit = classify("Fan the Flames Whenever you play a song, this character gets +1 {L} this turn.");
    assert_eq!(unit.category, AbilityCategory::Triggered);
    assert_eq!(unit.name.as_deref(), Some("Fan the Flames"));
    assert_eq!(unit.lead_clause.as_deref(), Some("Whenever you play a song"));
}

#[test]
fn test_classify_plain_sentence_has_no_name() {
    let unit = classify("Deal 3 damage to chosen character.");
    assert_eq!(unit.category, AbilityCategory::Static);
    assert_eq!(unit.name, None);
    assert_eq!(unit.effect_clause, "Deal 3 damage to chosen character.");
}

#[test]
fn test_classify_while_is_conditional_static() {
    let unit = classify("While this character is exerted, your characters get +1 {S}.");
    assert_eq!(unit.category, AbilityCategory::Static);
    assert_eq!(unit.lead_clause.as_deref(), Some("While this character is exerted"));
    assert_eq!(unit.effect_clause, "your characters get +1 {S}.");
}

#[test]
fn test_cost_clause_atoms() {
    assert_eq!(
        parse_cost_clause("{E}, 2 {I}"),
        vec![Cost::exert_self(), Cost::pay_ink(2)]
    );
    assert_eq!(parse_cost_clause("Banish this item"), vec![Cost::banish_self()]);

    let discard = parse_cost_clause("Choose and discard a song card");
    assert_eq!(discard.len(), 1);
    assert_eq!(discard[0].kind, CostKind::Discard);
    assert_eq!(discard[0].amount, Some(1));
    assert_eq!(discard[0].descriptor.as_deref(), Some("a song card"));

    let exert = parse_cost_clause("Exert one of your characters");
    assert_eq!(exert[0].kind, CostKind::ExertOther);
    assert_eq!(exert[0].descriptor.as_deref(), Some("one of your characters"));
}

#[test]
fn test_unknown_cost_atom_is_kept_verbatim() {
    let costs = parse_cost_clause("{E}, Sing a song");
    assert_eq!(costs.len(), 2);
    assert_eq!(costs[0], Cost::exert_self());
    assert_eq!(costs[1], Cost::custom("Sing a song"));
}

#[test]
fn test_trigger_clause_events_and_subjects() {
    let quests = parse_trigger_clause("Whenever this character quests");
    assert_eq!(quests.len(), 1);
    assert_eq!(quests[0].event, TriggerEvent::Quests);
    assert_eq!(quests[0].subject, TriggerSubject::This);

    let banished = parse_trigger_clause("Whenever one of your characters is banished in a challenge");
    assert_eq!(banished[0].event, TriggerEvent::BanishedInChallenge);
    assert_eq!(banished[0].subject, TriggerSubject::YourCharacters);

    let start = parse_trigger_clause("At the start of your turn");
    assert_eq!(start[0].event, TriggerEvent::TurnStart);
    assert_eq!(start[0].subject, TriggerSubject::You);

    let song = parse_trigger_clause("Whenever you play a song");
    assert_eq!(song[0].event, TriggerEvent::Played);
    assert_eq!(song[0].subject, TriggerSubject::Described("a song".to_string()));
}

#[test]
fn test_trigger_clause_with_alternatives() {
    let triggers = parse_trigger_clause("When you play this character and whenever he quests");
    let events: Vec<TriggerEvent> = triggers.iter().map(|t| t.event.clone()).collect();
    assert_eq!(events, vec![TriggerEvent::Played, TriggerEvent::Quests]);
    assert!(triggers.iter().all(|t| t.subject == TriggerSubject::This));
}

#[test]
fn test_unrecognized_trigger_is_custom() {
    let triggers = parse_trigger_clause("Whenever the moon is full");
    assert_eq!(triggers.len(), 1);
    assert!(matches!(triggers[0].event, TriggerEvent::Custom(_)));
}

#[test]
fn test_effect_stat_boost_with_duration() {
    let effect = only_effect("Chosen character gets +2 {S} this turn.");
    assert_eq!(effect.verb, Verb::ModifyStat(Stat::Strength));
    assert_eq!(effect.target, Target::chosen_character());
    assert_eq!(effect.amount, Some(Amount::Fixed(2)));
    assert_eq!(effect.duration, Until::ThisTurn);
}

#[test]
fn test_effect_multiple_stats_in_one_clause() {
    let effects = parse_effect_text("Your characters get +1 {S} and +1 {W}.");
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0].verb, Verb::ModifyStat(Stat::Strength));
    assert_eq!(effects[1].verb, Verb::ModifyStat(Stat::Willpower));
    let filter = effects[0].target.filter().expect("all-matching target");
    assert!(matches!(effects[0].target, Target::All(_)));
    assert_eq!(filter.controller, Some(Controller::You));
    assert_eq!(filter.kinds, vec![ObjectKind::Character]);
}

#[test]
fn test_effect_conjunction_shares_subject_and_duration() {
    let effects = parse_effect_text("Chosen character gets +2 {S} and gains Evasive this turn.");
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[1].verb, Verb::GrantKeyword(Keyword::Evasive));
    assert_eq!(effects[1].target, effects[0].target);
    assert_eq!(effects[0].duration, Until::ThisTurn);
    assert_eq!(effects[1].duration, Until::ThisTurn);
}

#[test]
fn test_effect_player_verbs() {
    let lose = only_effect("Each opponent loses 1 lore.");
    assert_eq!(lose.verb, Verb::LoseResource(Resource::Lore));
    assert_eq!(lose.target, Target::EachOpponent);
    assert_eq!(lose.amount, Some(Amount::Fixed(1)));

    let gain = only_effect("Gain lore equal to the damage on chosen character.");
    assert_eq!(gain.verb, Verb::GainResource(Resource::Lore));
    assert_eq!(gain.target, Target::You);
    assert_eq!(
        gain.amount,
        Some(Amount::EqualTo("the damage on chosen character".to_string()))
    );
}

#[test]
fn test_effect_damage_and_banish_targets() {
    let deal = only_effect("Deal 2 damage to chosen character.");
    assert_eq!(deal.verb, Verb::DealDamage);
    assert_eq!(deal.amount, Some(Amount::Fixed(2)));
    assert_eq!(deal.target, Target::chosen_character());

    let banish = only_effect("Banish chosen opposing character.");
    assert_eq!(banish.target, Target::chosen_opposing_character());

    let equal = only_effect("Deal damage equal to their {S} to another chosen character.");
    assert_eq!(equal.amount, Some(Amount::EqualTo("their {S}".to_string())));
    let filter = equal.target.filter().expect("chosen target");
    assert!(filter.other);
}

#[test]
fn test_effect_return_to_hand() {
    let effect = only_effect("Return chosen character with cost 2 or less to their player's hand.");
    assert_eq!(effect.verb, Verb::ReturnToHand);
    let filter = effect.target.filter().expect("chosen target");
    assert_eq!(filter.cost_at_most, Some(2));
}

#[test]
fn test_effect_then_sequencing() {
    let effect = only_effect("Draw a card, then choose and discard a card.");
    assert_eq!(effect.verb, Verb::Draw);
    assert_eq!(effect.join, Some(Join::Then));
    assert_eq!(effect.children.len(), 1);
    assert_eq!(effect.children[0].verb, Verb::Discard);
    assert_eq!(effect.children[0].target, Target::You);
}

#[test]
fn test_effect_enabling_sub_action() {
    let effect = only_effect("You may pay 2 {I} to gain 2 lore.");
    assert_eq!(effect.verb, Verb::PayInk);
    assert!(effect.optional);
    assert!(effect.enabling);
    assert_eq!(effect.join, Some(Join::Enables));
    assert_eq!(effect.children[0].verb, Verb::GainResource(Resource::Lore));
    assert_eq!(effect.children[0].amount, Some(Amount::Fixed(2)));
}

#[test]
fn test_effect_conditional_instead() {
    let effect = only_effect(
        "Deal 2 damage to chosen character. If you have a character named Elsa in play, deal 4 damage instead.",
    );
    assert_eq!(effect.verb, Verb::DealDamage);
    assert_eq!(effect.join, Some(Join::Instead));
    let alternate = &effect.children[0];
    assert_eq!(alternate.amount, Some(Amount::Fixed(4)));
    match &alternate.condition {
        Some(Condition::YouHaveInPlay { filter, at_least }) => {
            assert_eq!(*at_least, 1);
            assert_eq!(filter.named.as_deref(), Some("Elsa"));
        }
        other => panic!("unexpected condition {other:?}"),
    }
}

#[test]
fn test_effect_choose_one_modes() {
    let effect = only_effect("Choose one: • Draw 2 cards. • Banish chosen item.");
    assert_eq!(effect.verb, Verb::ChooseOne);
    assert_eq!(effect.join, Some(Join::Or));
    assert_eq!(effect.children.len(), 2);
    assert_eq!(effect.children[0].amount, Some(Amount::Fixed(2)));
    assert_eq!(effect.children[1].verb, Verb::Banish);
    let filter = effect.children[1].target.filter().expect("chosen item");
    assert_eq!(filter.kinds, vec![ObjectKind::Item]);
}

#[test]
fn test_effect_or_between_verbs_offers_a_choice() {
    let effect = only_effect("You may draw a card or gain 1 lore.");
    assert_eq!(effect.verb, Verb::ChooseOne);
    assert!(effect.optional);
    assert_eq!(effect.join, Some(Join::Or));
    assert_eq!(effect.children.len(), 2);
    assert_eq!(effect.children[0].verb, Verb::Draw);
    assert_eq!(effect.children[1].verb, Verb::GainResource(Resource::Lore));
    assert_eq!(effect.children[1].amount, Some(Amount::Fixed(1)));
}

#[test]
fn test_effect_or_keeps_both_targeted_options() {
    let effect = only_effect(
        "Return chosen character with cost 2 or less to their player's hand or banish chosen item.",
    );
    assert_eq!(effect.verb, Verb::ChooseOne);
    assert_eq!(effect.children.len(), 2);

    let returned = &effect.children[0];
    assert_eq!(returned.verb, Verb::ReturnToHand);
    let filter = returned.target.filter().expect("chosen character");
    assert_eq!(filter.cost_at_most, Some(2));

    let banished = &effect.children[1];
    assert_eq!(banished.verb, Verb::Banish);
    let filter = banished.target.filter().expect("chosen item");
    assert_eq!(filter.kinds, vec![ObjectKind::Item]);
}

#[test]
fn test_effect_may_covers_only_its_own_clause() {
    let effects = parse_effect_text("Each opponent loses 1 lore and you may draw a card.");
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0].verb, Verb::LoseResource(Resource::Lore));
    assert_eq!(effects[0].target, Target::EachOpponent);
    assert!(!effects[0].optional);
    assert_eq!(effects[1].verb, Verb::Draw);
    assert!(effects[1].optional);
}

#[test]
fn test_effect_ready_as_adjective_is_part_of_the_subject() {
    let effect = only_effect("Your ready characters get +1 {S} this turn.");
    assert_eq!(effect.verb, Verb::ModifyStat(Stat::Strength));
    assert_eq!(effect.duration, Until::ThisTurn);
    let Target::All(filter) = &effect.target else {
        panic!("expected every matching character, got {:?}", effect.target);
    };
    assert!(filter.ready);
    assert_eq!(filter.controller, Some(Controller::You));
    assert_eq!(filter.kinds, vec![ObjectKind::Character]);
}

#[test]
fn test_effect_target_with_keyword_predicate() {
    let effect = only_effect("Banish chosen character with Evasive.");
    assert_eq!(
        effect.target,
        Target::Chosen(ObjectFilter::character().with_keyword(Keyword::Evasive))
    );
}

#[test]
fn test_effect_unknown_target_predicate_is_kept_verbatim() {
    for text in [
        "Banish chosen character with 3 {S} or less.",
        "Banish this character at the end of the turn.",
        "Chosen character gets +2 {S} while it is exerted.",
        "Draw a card for free.",
    ] {
        let effects = parse_effect_text(text);
        assert_eq!(effects.len(), 1, "{text}: {effects:?}");
        assert!(effects[0].is_fallback(), "{text} should be kept verbatim: {effects:?}");
    }
}

#[test]
fn test_effect_restriction_on_reference() {
    let effects = parse_effect_text("Ready chosen character. They can't quest for the rest of this turn.");
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0].verb, Verb::Ready);
    assert_eq!(effects[1].verb, Verb::Prevent(PreventedAction::Quest));
    assert_eq!(effects[1].target, Target::Reference("They".to_string()));
    assert_eq!(effects[1].duration, Until::ThisTurn);
}

#[test]
fn test_effect_until_start_of_next_turn() {
    let effect = only_effect("Chosen opposing character can't ready at the start of their next turn.");
    assert_eq!(effect.verb, Verb::Prevent(PreventedAction::Ready));
    assert_eq!(effect.duration, Until::TheirNextTurn);
}

#[test]
fn test_unparseable_sentence_falls_back_to_custom() {
    let effects = parse_effect_text("Look at the top 3 cards of your deck.");
    assert_eq!(effects.len(), 1);
    assert!(effects[0].is_fallback());
    assert_eq!(effects[0].text, "Look at the top 3 cards of your deck");
}

#[test]
fn test_keyword_and_named_trigger_card() {
    let abilities = parse(
        "Test Hero",
        CardType::Character,
        &[
            "Evasive (Only characters with Evasive can challenge this character.)",
            "NAME Whenever this character quests, you may draw a card.",
        ],
    );
    assert_eq!(abilities.len(), 2);

    let evasive = &abilities[0];
    assert_eq!(evasive.category, AbilityCategory::Static);
    assert_eq!(evasive.keyword, Some(Keyword::Evasive));
    assert_eq!(
        evasive.reminder_text.as_deref(),
        Some("Only characters with Evasive can challenge this character.")
    );
    assert_eq!(evasive.effects[0].verb, Verb::GrantKeyword(Keyword::Evasive));

    let named = &abilities[1];
    assert_eq!(named.category, AbilityCategory::Triggered);
    assert_eq!(named.name.as_deref(), Some("NAME"));
    assert_eq!(named.triggers[0].event, TriggerEvent::Quests);
    assert_eq!(named.triggers[0].subject, TriggerSubject::This);
    assert_eq!(named.effects.len(), 1);
    assert_eq!(named.effects[0].verb, Verb::Draw);
    assert!(named.effects[0].optional);
    assert!(named.costs.is_empty());
}

#[test]
fn test_keyword_modifier_is_recorded() {
    let abilities = parse(
        "Test Brawler",
        CardType::Character,
        &["Challenger +3 (While challenging, this character gets +3 ¤.)"],
    );
    assert_eq!(abilities[0].keyword, Some(Keyword::Challenger));
    assert_eq!(abilities[0].keyword_value, Some(3));
    assert_eq!(abilities[0].effects[0].amount, Some(Amount::Fixed(3)));
}

#[test]
fn test_triggered_keyword_support() {
    let abilities = parse(
        "Test Helper",
        CardType::Character,
        &["Support (Whenever this character quests, you may add their ¤ to another chosen character's ¤ this turn.)"],
    );
    let support = &abilities[0];
    assert_eq!(support.category, AbilityCategory::Triggered);
    assert_eq!(support.triggers[0].event, TriggerEvent::Quests);
    let effect = &support.effects[0];
    assert_eq!(effect.verb, Verb::ModifyStat(Stat::Strength));
    assert!(effect.optional);
    let filter = effect.target.filter().expect("chosen target");
    assert!(filter.other);
    assert_eq!(filter.controller, Some(Controller::You));
}

#[test]
fn test_activated_item_ability() {
    let abilities = parse(
        "Dinglehopper",
        CardType::Item,
        &["STRAIGHTEN HAIR ⟳ — Remove up to 1 damage from chosen character."],
    );
    let ability = &abilities[0];
    assert_eq!(ability.category, AbilityCategory::Activated);
    assert_eq!(ability.costs, vec![Cost::exert_self()]);
    assert_eq!(ability.effects[0].verb, Verb::RemoveDamage);
    assert_eq!(ability.effects[0].amount, Some(Amount::UpTo(1)));
    assert!(!ability.needs_manual_review());
}

#[test]
fn test_self_name_is_resolved_in_trigger() {
    let abilities = parse(
        "Ariel",
        CardType::Character,
        &["SONG OF THE SEA Whenever Ariel quests, each opponent loses 1 lore."],
    );
    assert_eq!(abilities[0].triggers[0].subject, TriggerSubject::This);
    assert_eq!(abilities[0].effects[0].target, Target::EachOpponent);
}

#[test]
fn test_conditional_static_ability() {
    let abilities = parse(
        "Test Guard",
        CardType::Character,
        &["STAND TALL While this character is exerted, your characters get +1 {W}."],
    );
    let ability = &abilities[0];
    assert_eq!(ability.category, AbilityCategory::Static);
    assert_eq!(ability.effects[0].condition, Some(Condition::ThisIsExerted));
}

#[test]
fn test_song_reminder_unit_becomes_static_text() {
    let abilities = parse(
        "Test Song",
        CardType::Action,
        &[
            "(A character with cost 2 or more can ⟳ to sing this song for free.)",
            "Deal 3 damage to chosen character.",
        ],
    );
    assert_eq!(abilities.len(), 2);
    assert_eq!(abilities[0].category, AbilityCategory::Static);
    assert!(abilities[0].needs_manual_review());
    assert!(abilities[0].reminder_text.is_some());
    assert_eq!(abilities[1].effects[0].verb, Verb::DealDamage);
}

#[test]
fn test_ability_ids_follow_unit_positions() {
    let abilities = parse(
        "Test Hero",
        CardType::Character,
        &["Rush", "Ward", "Whenever this character quests, gain 1 lore."],
    );
    let indices: Vec<usize> = abilities.iter().map(|ability| ability.id.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(abilities.iter().all(|ability| ability.id.card == CardId::from_raw(42)));
    assert!(abilities.iter().all(|ability| ability.validate().is_ok()));
}

#[test]
fn test_unparseable_activated_effect_keeps_costs() {
    let abilities = parse(
        "Test Tinker",
        CardType::Item,
        &["{E}, 1 {I} — Look at the top card of your deck."],
    );
    let ability = &abilities[0];
    assert_eq!(ability.category, AbilityCategory::Activated);
    assert_eq!(ability.costs, vec![Cost::exert_self(), Cost::pay_ink(1)]);
    assert!(ability.effects[0].is_fallback());
}
