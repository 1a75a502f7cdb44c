use skylux::core::flow::{Refusal, Stage, Transition};
use skylux::core::{AgeGroup, Answers, Flag, RiskTier, Sex};
use skylux::{scorer, Catalog, Session, Summary};

fn admitted_session() -> Session {
    let mut session = Session::new("en");
    let flow = session.flow_mut();
    let _ = flow.set_booking_code("#12345");
    let _ = flow.set_consent(true);
    assert_eq!(flow.start(), Transition::Advanced);
    session
}

#[test]
fn test_scenario_default_answers_low_risk() {
    let mut session = admitted_session();
    let flow = session.flow_mut();

    assert_eq!(flow.show_score(), Transition::Advanced);
    let score = flow.score().unwrap();
    assert_eq!(scorer::raw_points(flow.answers()), 4);
    assert_eq!(score.value, 2.5);
    assert_eq!(score.tier, RiskTier::Low);
}

#[test]
fn test_scenario_every_flag_caps_at_ten() {
    let mut session = admitted_session();
    let flow = session.flow_mut();
    let _ = flow.update_answers(|answers| {
        answers.age_group = AgeGroup::From16To25;
        answers.sex = Sex::Male;
        for flag in Flag::ALL {
            answers.set_flag(flag, true);
        }
    });

    let _ = flow.show_score();
    assert_eq!(scorer::raw_points(flow.answers()), 19);
    let score = flow.score().unwrap();
    assert_eq!(score.value, 10.0);
    assert_eq!(score.tier, RiskTier::High);
}

#[test]
fn test_gate_refusals_are_independent() {
    for consent in [true, false] {
        let mut session = Session::new("en");
        let flow = session.flow_mut();
        let _ = flow.set_booking_code("");
        let _ = flow.set_consent(consent);
        assert_eq!(flow.start(), Transition::Refused(Refusal::BookingCodeRequired));
        assert_eq!(flow.stage(), Stage::Gate);
    }

    for booking_code in ["", "#1", "  ABC  "] {
        let mut session = Session::new("en");
        let flow = session.flow_mut();
        let _ = flow.set_booking_code(booking_code);
        let _ = flow.set_consent(false);
        assert!(flow.start().is_refused());
        assert!(flow.gate_refusals().contains(&Refusal::ConsentRequired));
        assert_eq!(flow.stage(), Stage::Gate);
    }
}

#[test]
fn test_surgical_discount_is_joint() {
    let base = Answers {
        sex: Sex::Female,
        age_group: AgeGroup::Over35,
        ..Answers::default()
    };

    let operative_only = Answers {
        operative_treatment: true,
        ..base
    };
    assert_eq!(scorer::raw_points(&operative_only), scorer::raw_points(&base));

    let dislocated = Answers {
        prior_dislocation: true,
        ..base
    };
    let operated = Answers {
        operative_treatment: true,
        ..dislocated
    };
    assert_eq!(scorer::raw_points(&dislocated), 4);
    assert_eq!(scorer::raw_points(&operated), 2);
}

#[test]
fn test_rescoring_after_edit_uses_new_answers() {
    let mut session = admitted_session();
    let flow = session.flow_mut();
    let _ = flow.show_score();
    let first = flow.score().unwrap();

    let _ = flow.edit_answers();
    let _ = flow.update_answers(|answers| answers.skydive_test_positive = true);
    let _ = flow.show_score();
    let second = flow.score().unwrap();

    // 4 + 3 = 7 -> 4.375
    assert_eq!(first.value, 2.5);
    assert_eq!(second.value, 4.4);
    assert_eq!(second.tier, RiskTier::Moderate);
}

#[test]
fn test_decision_selects_final_message() {
    let catalog = Catalog::builtin();

    for (wants_to_fly, expected) in [
        (true, "Great – have fun flying!"),
        (false, "Smart choice – enjoy a drink and relax!"),
    ] {
        let mut session = admitted_session();
        let flow = session.flow_mut();
        let _ = flow.show_score();
        assert_eq!(flow.confirm(wants_to_fly), Transition::Advanced);

        let summary = Summary::from_session(&session, &catalog).unwrap();
        assert_eq!(summary.final_message, expected);
        assert_eq!(session.flow().wants_to_fly(), Some(wants_to_fly));
    }
}
