//! In-page anchor scrolling with a fixed-nav offset and the contact highlight.

use std::future::Future;

use tracing::debug;

use crate::typing::Motion;

pub const DURATION_MS: f64 = 520.0;
/// Extra gap kept between the nav bar and the target on anchor clicks.
pub const ANCHOR_GAP_PX: f64 = 14.0;
pub const DEFAULT_GAP_PX: f64 = 12.0;

pub const CONTACT_ANCHOR: &str = "#contact";
pub const CONTACT_SECTION_ID: &str = "contact";
pub const CONTACT_CARD_ID: &str = "contactCard";
pub const HIGHLIGHT_CLASS: &str = "contact-highlight";
/// Distance below the nav bar the contact section must span to count as arrived.
pub const ARRIVAL_BAND_PX: f64 = 30.0;
pub const ARRIVAL_FIRST_CHECK_MS: u64 = 200;

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Document y to scroll to so the target sits just below the nav bar.
pub fn target_y(target_top: f64, scroll_y: f64, nav_height: f64, gap: f64) -> f64 {
    (target_top + scroll_y - nav_height - gap).round().max(0.0)
}

/// Browser side of the scroll controller.
pub trait ScrollPort {
    /// Viewport-relative top of the element matching `selector`.
    fn element_top(&self, selector: &str) -> Option<f64>;
    fn nav_height(&self) -> f64;
    fn scroll_y(&self) -> f64;
    fn scroll_to(&mut self, y: f64);
    fn motion(&self) -> Motion;
    fn close_menu(&mut self);
    /// Retrigger the highlight animation on the contact card.
    fn highlight_contact(&mut self);
    /// Milliseconds on the same clock `next_frame` reports.
    fn now(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPlan {
    pub start_y: f64,
    pub target_y: f64,
    pub motion: Motion,
    pub highlight_on_arrival: bool,
}

impl ScrollPlan {
    /// Eased position `elapsed_ms` into the animation, and whether it is done.
    pub fn position_at(&self, elapsed_ms: f64) -> (f64, bool) {
        let p = (elapsed_ms / DURATION_MS).clamp(0.0, 1.0);
        let y = (self.start_y + (self.target_y - self.start_y) * ease_out_cubic(p)).round();
        (y, p >= 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorClick {
    /// Let the browser handle the click.
    PassThrough,
    /// Default navigation must be prevented; run the plan.
    Scroll(ScrollPlan),
}

pub fn on_anchor_click<P: ScrollPort>(href: &str, port: &mut P) -> AnchorClick {
    if href.len() < 2 || !href.starts_with('#') {
        return AnchorClick::PassThrough;
    }
    let Some(top) = port.element_top(href) else {
        debug!("scroll.anchor: no target for {href}");
        return AnchorClick::PassThrough;
    };

    port.close_menu();
    let start_y = port.scroll_y();
    let plan = ScrollPlan {
        start_y,
        target_y: target_y(top, start_y, port.nav_height(), ANCHOR_GAP_PX),
        motion: port.motion(),
        highlight_on_arrival: href == CONTACT_ANCHOR,
    };
    debug!("scroll.anchor: {href} {start_y} -> {}", plan.target_y);
    AnchorClick::Scroll(plan)
}

/// Run `plan`, awaiting `next_frame` (which yields the frame timestamp) between steps.
pub async fn perform<P, F, Fut>(plan: &ScrollPlan, port: &mut P, mut next_frame: F)
where
    P: ScrollPort,
    F: FnMut() -> Fut,
    Fut: Future<Output = f64>,
{
    match plan.motion {
        Motion::Reduced => port.scroll_to(plan.target_y),
        Motion::Full => {
            let started = port.now();
            loop {
                let now = next_frame().await;
                let (y, done) = plan.position_at(now - started);
                port.scroll_to(y);
                if done {
                    break;
                }
            }
        }
    }

    if plan.highlight_on_arrival {
        port.highlight_contact();
    }
}

/// Fires once, the first time the contact section crosses the band under the nav.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactArrivalWatcher {
    armed: bool,
}

impl Default for ContactArrivalWatcher {
    fn default() -> Self {
        Self { armed: true }
    }
}

impl ContactArrivalWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns `true` exactly once; the watcher detaches afterwards.
    pub fn observe(&mut self, rect_top: f64, rect_bottom: f64, nav_height: f64) -> bool {
        if !self.armed {
            return false;
        }
        let line = nav_height + ARRIVAL_BAND_PX;
        if rect_top <= line && rect_bottom >= line {
            self.armed = false;
            return true;
        }
        false
    }
}
