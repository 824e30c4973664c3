//! Browser glue: the wasm exports the pages call.
//!
//! Everything here is thin. The controllers do the work through the `Page`
//! trait; this module supplies the DOM (`dom`), the network (`http`) and the
//! Chart.js binding (`chart`).

mod chart;
mod dom;
mod http;

use std::cell::RefCell;

use log::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::battle::controller::{self, BattleController};
use crate::battle::turns::{MoveKind, Side};
use crate::chart::config::bar_chart;
use crate::chart::faction::{FactionSeries, parse_faction_counts};
use crate::config::{ClientConfig, ElementIds};
use crate::error::ClientError;
use dom::DomPage;

thread_local! {
    static CONFIG: RefCell<ClientConfig> = RefCell::new(ClientConfig::default());
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) keeps the first logger
    console_log::init_with_level(log::Level::Debug).ok();
}

pub(crate) fn js_error(e: JsValue) -> ClientError {
    ClientError::Transport(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

fn to_js(e: ClientError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ── Faction chart ──────────────────────────────────────────────────

/// Fetch the faction member counts and draw the bar chart.
///
/// Failures are logged and leave the canvas empty; there is no retry.
#[wasm_bindgen]
pub async fn load_faction_chart(config_json: String) {
    if let Err(e) = render_faction_chart(&config_json).await {
        error!("faction chart not rendered: {e}");
    }
}

async fn render_faction_chart(config_json: &str) -> Result<(), ClientError> {
    let config = ClientConfig::from_json(config_json)?;
    let body = http::send(&config, "GET", &config.endpoints.faction_counts, None, "").await?;
    let series = FactionSeries::from_stats(&parse_faction_counts(&body)?);
    debug!("faction chart: {} factions", series.labels.len());

    let page = DomPage::from_window()?;
    chart::render(page.document(), &config.elements.chart_canvas, &bar_chart(&series))
}

// ── Battle ─────────────────────────────────────────────────────────

/// Read the battle's hidden fields, set the attack buttons and wire their
/// click handlers. Call once per page load.
#[wasm_bindgen]
pub fn mount_battle(config_json: &str) -> Result<(), JsValue> {
    let config = ClientConfig::from_json(config_json).map_err(to_js)?;
    let mut page = DomPage::from_window().map_err(to_js)?;
    let controller = BattleController::mount(&mut page, config.elements.clone()).map_err(|e| {
        error!("battle not mounted: {e}");
        to_js(e)
    })?;
    controller::install(controller);
    wire_buttons(&page, &config.elements)?;
    CONFIG.with(|c| *c.borrow_mut() = config);
    Ok(())
}

/// Attack with `side` ("char1"/"char2") using `kind` ("fuerte"/"debil").
///
/// Returns once the request is sent; the page is patched when the reply
/// arrives.
#[wasm_bindgen]
pub fn attack(side: &str, kind: &str) -> Result<(), JsValue> {
    let side = Side::parse(side).ok_or_else(|| JsValue::from_str(&format!("unknown side `{side}`")))?;
    let kind =
        MoveKind::parse(kind).ok_or_else(|| JsValue::from_str(&format!("unknown attack `{kind}`")))?;
    dispatch_attack(side, kind);
    Ok(())
}

fn wire_buttons(page: &DomPage, ids: &ElementIds) -> Result<(), JsValue> {
    let buttons = [
        (&ids.char1_strong, Side::Char1, MoveKind::Strong),
        (&ids.char1_weak, Side::Char1, MoveKind::Weak),
        (&ids.char2_strong, Side::Char2, MoveKind::Strong),
        (&ids.char2_weak, Side::Char2, MoveKind::Weak),
    ];
    for (id, side, kind) in buttons {
        let Some(button) = page.document().get_element_by_id(id) else {
            warn!("no button `{id}`; {side:?} can only attack through `attack()`");
            continue;
        };
        let on_click = Closure::<dyn FnMut()>::new(move || dispatch_attack(side, kind));
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

fn dispatch_attack(side: Side, kind: MoveKind) {
    let mut page = match DomPage::from_window() {
        Ok(page) => page,
        Err(e) => {
            error!("attack dropped: {e}");
            return;
        }
    };
    let pending = match controller::with_controller_mut(|c| c.begin_attack(&mut page, side, kind)) {
        Some(Ok(pending)) => pending,
        // Busy / GameOver are logged by the controller
        Some(Err(_)) => return,
        None => {
            warn!("attack dropped: no battle mounted");
            return;
        }
    };
    let config = CONFIG.with(|c| c.borrow().clone());

    // The controller borrow is released before the await and retaken after
    spawn_local(async move {
        let body = pending.request.to_json();
        let result = http::send(
            &config,
            "POST",
            &config.endpoints.attack,
            Some(&body),
            &pending.csrf_token,
        )
        .await;
        let phase = controller::with_controller_mut(|c| c.complete_attack(&mut page, result));
        if let Some(Ok(phase)) = phase {
            info!("attack resolved: {phase:?}");
        }
    });
}
