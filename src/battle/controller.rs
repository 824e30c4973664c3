//! Battle UI controller.
//!
//! Holds the one client-side copy of the battle state. The hidden page fields
//! seed it at mount; after that only server responses move it. Attack
//! requests are single-slot: while one is in flight every attack button is
//! disabled and further attacks are refused.

use std::cell::RefCell;

use log::{debug, error, info, warn};

use super::ids::CharacterId;
use super::response::{AttackOutcome, AttackRequest, NextTurn, format_hp, parse_attack_response};
use super::turns::{Enablement, MoveKind, Side, TurnPhase, compute_enablement};
use crate::config::ElementIds;
use crate::error::ClientError;
use crate::page::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleState {
    pub char1: CharacterId,
    pub char2: CharacterId,
    pub phase: TurnPhase,
}

impl BattleState {
    pub fn id_of(&self, side: Side) -> &CharacterId {
        match side {
            Side::Char1 => &self.char1,
            Side::Char2 => &self.char2,
        }
    }
}

/// An attack that has been admitted and is waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttack {
    pub request: AttackRequest,
    /// Empty when the page has no CSRF field (offline pages).
    pub csrf_token: String,
}

#[derive(Debug, Clone)]
pub struct BattleController {
    ids: ElementIds,
    state: BattleState,
    in_flight: bool,
}

impl BattleController {
    /// Read the initial turn state from the hidden fields and set the buttons.
    pub fn mount<P: Page>(page: &mut P, ids: ElementIds) -> Result<Self, ClientError> {
        let read = |id: &str| {
            page.field_value(id)
                .map(CharacterId::new)
                .ok_or_else(|| ClientError::MissingElement(id.to_string()))
        };
        let turn_player = read(&ids.turn_player)?;
        let char1 = read(&ids.char1_id)?;
        let char2 = read(&ids.char2_id)?;

        let phase = TurnPhase::from_turn_player(&turn_player, &char1);
        let controller = BattleController {
            ids,
            state: BattleState { char1, char2, phase },
            in_flight: false,
        };
        info!(
            "battle mounted: {} vs {}, {:?}",
            controller.state.char1, controller.state.char2, phase
        );
        controller.apply_enablement(page);
        Ok(controller)
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Enablement implied by the current state.
    pub fn enablement(&self) -> Enablement {
        match self.state.phase {
            TurnPhase::GameOver => Enablement::NONE,
            TurnPhase::Char1Turn => {
                compute_enablement(&self.state.char1, &self.state.char1, &self.state.char2)
            }
            TurnPhase::Char2Turn => {
                compute_enablement(&self.state.char2, &self.state.char1, &self.state.char2)
            }
        }
    }

    /// Admit an attack: take the in-flight slot and lock every button.
    pub fn begin_attack<P: Page>(
        &mut self,
        page: &mut P,
        side: Side,
        kind: MoveKind,
    ) -> Result<PendingAttack, ClientError> {
        if self.in_flight {
            warn!("attack ignored: a previous attack is still in flight");
            return Err(ClientError::Busy);
        }
        if self.state.phase.is_over() {
            warn!("attack ignored: the battle is over");
            return Err(ClientError::GameOver);
        }
        if !self.enablement().is_enabled(side) {
            debug!("{side:?} attacks out of turn; leaving it to the server");
        }

        let csrf_token = page.named_value(&self.ids.csrf_field).unwrap_or_else(|| {
            warn!("no `{}` field on the page; sending without a CSRF token", self.ids.csrf_field);
            String::new()
        });
        let request = AttackRequest {
            ataque: kind,
            attacker: self.state.id_of(side).clone(),
        };

        self.in_flight = true;
        self.write_enablement(page, Enablement::NONE);
        debug!("attack admitted: {}", request.to_json());
        Ok(PendingAttack { request, csrf_token })
    }

    /// Finish the in-flight attack with the response body (or the transport
    /// failure). The slot is released whatever the outcome; on failure the
    /// buttons return to what the state says and nothing else changes.
    pub fn complete_attack<P: Page>(
        &mut self,
        page: &mut P,
        result: Result<String, ClientError>,
    ) -> Result<TurnPhase, ClientError> {
        self.in_flight = false;
        match result.and_then(|body| parse_attack_response(&body)) {
            Ok(outcome) => {
                self.apply_outcome(page, &outcome);
                Ok(self.state.phase)
            }
            Err(e) => {
                error!("attack failed: {e}");
                self.apply_enablement(page);
                Err(e)
            }
        }
    }

    /// Patch HP, comment and buttons from a successful response.
    pub fn apply_outcome<P: Page>(&mut self, page: &mut P, outcome: &AttackOutcome) {
        page.set_text(&self.ids.char1_hp, &format_hp(outcome.char1_hp));
        page.set_text(&self.ids.char2_hp, &format_hp(outcome.char2_hp));
        page.set_text(&self.ids.comment, outcome.comment());

        if let Some(id) = &outcome.char1_id {
            self.state.char1 = id.clone();
        }
        if let Some(id) = &outcome.char2_id {
            self.state.char2 = id.clone();
        }
        self.state.phase = match &outcome.next {
            NextTurn::Player(turn_player) => {
                TurnPhase::from_turn_player(turn_player, &self.state.char1)
            }
            NextTurn::Winner(msg) => {
                info!("battle over: {msg}");
                TurnPhase::GameOver
            }
        };
        self.apply_enablement(page);
    }

    fn apply_enablement<P: Page>(&self, page: &mut P) {
        self.write_enablement(page, self.enablement());
    }

    fn write_enablement<P: Page>(&self, page: &mut P, enablement: Enablement) {
        for id in self.ids.char1_buttons() {
            page.set_disabled(id, !enablement.char1_enabled);
        }
        for id in self.ids.char2_buttons() {
            page.set_disabled(id, !enablement.char2_enabled);
        }
    }
}

thread_local! {
    static CONTROLLER: RefCell<Option<BattleController>> = const { RefCell::new(None) };
}

/// Install the page's controller, replacing any previous one.
pub fn install(controller: BattleController) {
    CONTROLLER.with(|c| *c.borrow_mut() = Some(controller));
}

/// Run a closure against the installed controller, if any.
pub fn with_controller_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut BattleController) -> R,
{
    CONTROLLER.with(|c| c.borrow_mut().as_mut().map(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::memory::MemoryPage;

    const HIT: &str =
        r#"{"char1_hp":7,"char2_hp":4,"frase":"hit!","turn_player":"c2","char1_id":"c1"}"#;
    const KO: &str = r#"{"char1_hp":7,"char2_hp":0,"frase":"hit!","turn_player":"c2","char1_id":"c1","winner":"Player 1 wins"}"#;

    fn mounted() -> (BattleController, MemoryPage) {
        let mut page = MemoryPage::battle("c1", "c1", "c2");
        let ctl = BattleController::mount(&mut page, ElementIds::default()).unwrap();
        (ctl, page)
    }

    fn char1_enabled_only(page: &MemoryPage) -> bool {
        !page.is_disabled("char1_fuerte")
            && !page.is_disabled("char1_debil")
            && page.is_disabled("char2_fuerte")
            && page.is_disabled("char2_debil")
    }

    fn char2_enabled_only(page: &MemoryPage) -> bool {
        page.is_disabled("char1_fuerte")
            && page.is_disabled("char1_debil")
            && !page.is_disabled("char2_fuerte")
            && !page.is_disabled("char2_debil")
    }

    fn all_disabled(page: &MemoryPage) -> bool {
        ["char1_fuerte", "char1_debil", "char2_fuerte", "char2_debil"]
            .iter()
            .all(|id| page.is_disabled(id))
    }

    #[test]
    fn mount_enables_turn_holder() {
        let (ctl, page) = mounted();
        assert!(char1_enabled_only(&page));
        assert_eq!(ctl.state().phase, TurnPhase::Char1Turn);
    }

    #[test]
    fn mount_with_char2_turn() {
        let mut page = MemoryPage::battle("c2", "c1", "c2");
        BattleController::mount(&mut page, ElementIds::default()).unwrap();
        assert!(char2_enabled_only(&page));
    }

    #[test]
    fn mount_without_hidden_fields_fails() {
        let mut page = MemoryPage::battle("c1", "c1", "c2");
        page.fields.remove("char2_id");
        let err = BattleController::mount(&mut page, ElementIds::default()).unwrap_err();
        assert_eq!(err, ClientError::MissingElement("char2_id".into()));
    }

    #[test]
    fn begin_attack_builds_request_and_locks_buttons() {
        let (mut ctl, mut page) = mounted();
        let pending = ctl.begin_attack(&mut page, Side::Char1, MoveKind::Strong).unwrap();
        assert_eq!(pending.request.ataque, MoveKind::Strong);
        assert_eq!(pending.request.attacker, CharacterId::from("c1"));
        assert_eq!(pending.csrf_token, "tok-123");
        assert!(ctl.is_in_flight());
        assert!(all_disabled(&page));
    }

    #[test]
    fn second_attack_while_in_flight_is_refused() {
        let (mut ctl, mut page) = mounted();
        ctl.begin_attack(&mut page, Side::Char1, MoveKind::Weak).unwrap();
        let err = ctl.begin_attack(&mut page, Side::Char1, MoveKind::Strong).unwrap_err();
        assert_eq!(err, ClientError::Busy);
    }

    #[test]
    fn successful_response_patches_page() {
        let (mut ctl, mut page) = mounted();
        ctl.begin_attack(&mut page, Side::Char1, MoveKind::Weak).unwrap();
        let phase = ctl.complete_attack(&mut page, Ok(HIT.to_string())).unwrap();
        assert_eq!(phase, TurnPhase::Char2Turn);
        assert_eq!(page.text_of("char1_hp"), Some("7"));
        assert_eq!(page.text_of("char2_hp"), Some("4"));
        assert_eq!(page.text_of("comentario"), Some("hit!"));
        assert!(char2_enabled_only(&page));
        assert!(!ctl.is_in_flight());
    }

    #[test]
    fn knockout_shows_winner_and_ends_battle() {
        let (mut ctl, mut page) = mounted();
        ctl.begin_attack(&mut page, Side::Char1, MoveKind::Strong).unwrap();
        let phase = ctl.complete_attack(&mut page, Ok(KO.to_string())).unwrap();
        assert_eq!(phase, TurnPhase::GameOver);
        assert_eq!(page.text_of("comentario"), Some("Player 1 wins"));
        assert_eq!(page.text_of("char2_hp"), Some("0"));
        assert!(all_disabled(&page));
        let err = ctl.begin_attack(&mut page, Side::Char2, MoveKind::Weak).unwrap_err();
        assert_eq!(err, ClientError::GameOver);
    }

    #[test]
    fn rejected_response_leaves_page_untouched() {
        let (mut ctl, mut page) = mounted();
        let before = page.clone();
        ctl.begin_attack(&mut page, Side::Char1, MoveKind::Weak).unwrap();
        let err = ctl
            .complete_attack(&mut page, Ok(r#"{"error":"not your turn"}"#.to_string()))
            .unwrap_err();
        assert_eq!(err, ClientError::Rejected("not your turn".into()));
        assert_eq!(page, before);
        assert_eq!(ctl.state().phase, TurnPhase::Char1Turn);
        assert!(!ctl.is_in_flight());
    }

    #[test]
    fn transport_failure_releases_the_slot() {
        let (mut ctl, mut page) = mounted();
        let before = page.clone();
        ctl.begin_attack(&mut page, Side::Char1, MoveKind::Weak).unwrap();
        let err = ctl
            .complete_attack(&mut page, Err(ClientError::Transport("offline".into())))
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(page, before);
        assert!(ctl.begin_attack(&mut page, Side::Char1, MoveKind::Weak).is_ok());
    }

    #[test]
    fn replaying_a_response_is_idempotent() {
        let (mut ctl, mut page) = mounted();
        let outcome = parse_attack_response(HIT).unwrap();
        ctl.apply_outcome(&mut page, &outcome);
        let once = page.clone();
        ctl.apply_outcome(&mut page, &outcome);
        assert_eq!(page, once);
    }

    #[test]
    fn later_attacks_use_state_ids_not_page_fields() {
        let (mut ctl, mut page) = mounted();
        ctl.begin_attack(&mut page, Side::Char1, MoveKind::Weak).unwrap();
        ctl.complete_attack(&mut page, Ok(HIT.to_string())).unwrap();
        page.fields.insert("char2_id".into(), "tampered".into());
        let pending = ctl.begin_attack(&mut page, Side::Char2, MoveKind::Weak).unwrap();
        assert_eq!(pending.request.attacker, CharacterId::from("c2"));
    }

    #[test]
    fn installed_controller_is_reachable() {
        let (ctl, _) = mounted();
        install(ctl);
        let phase = with_controller_mut(|c| c.state().phase);
        assert_eq!(phase, Some(TurnPhase::Char1Turn));
    }
}
