//! Reveal scheduling for content blocks.
//!
//! Every content section on the site is wrapped in a reveal block that slides
//! into place. A block has two visual states:
//!
//! - **Hidden**: translated by `offset` pixels along its [`Direction`], at
//!   full opacity.
//! - **Visible**: no translation.
//!
//! Opacity is never part of the contract. Crawlers that do not run
//! transitions must see the same readable text as a visitor, so a hidden
//! block is only displaced, never faded or blurred. [`VisualFrame::opacity`]
//! is always `1.0`.
//!
//! ## Policies
//!
//! The trigger is picked from the block's [`FoldClass`]:
//!
//! | Fold | Policy | Transition starts |
//! |------|--------|-------------------|
//! | `AboveFold` | [`RevealPolicy::Immediate`] | at mount |
//! | `BelowFold` | [`RevealPolicy::ViewportGated`] | first intersection event, `root_margin` early |
//!
//! Both policies share one block type; the only difference is what flips
//! the state. The flip is one-shot: once Visible, a block never goes back to
//! Hidden, and later intersection events are ignored.
//!
//! ## Failing open
//!
//! Viewport observation goes through the [`ViewportObserver`] trait. If the
//! observer reports an error (the platform has no intersection mechanism, or
//! it throws), the block is treated as already in view. Content is never left
//! waiting on a mechanism that cannot fire.
//!
//! ## Two renditions
//!
//! [`RevealScheduler`] is the model: it owns block state and answers "what
//! does block N look like at time T". The generated site carries the same
//! contract in `static/reveal.js`, driven by the data attributes that
//! [`RevealSpec::render`] emits.

use crate::config::RevealSettings;
use maud::{Markup, html};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Whether a block is visible without scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldClass {
    AboveFold,
    BelowFold,
}

impl FromStr for FoldClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "above" | "above-fold" => Ok(Self::AboveFold),
            "below" | "below-fold" => Ok(Self::BelowFold),
            other => Err(format!("unknown fold class '{other}' (expected above or below)")),
        }
    }
}

/// Direction the block travels while revealing.
///
/// `Up` starts below its resting place and moves up, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    /// Hidden-state translation `(x, y)` for a given distance.
    pub fn offset(self, distance: f64) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, distance),
            Direction::Down => (0.0, -distance),
            Direction::Left => (distance, 0.0),
            Direction::Right => (-distance, 0.0),
            Direction::None => (0.0, 0.0),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "none" => Ok(Direction::None),
            other => Err(format!(
                "unknown direction '{other}' (expected up, down, left, right, or none)"
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::None => "none",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Visible,
}

impl fmt::Display for RevealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevealState::Hidden => write!(f, "hidden"),
            RevealState::Visible => write!(f, "visible"),
        }
    }
}

/// Trigger strategy derived from a block's fold class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealPolicy {
    Immediate,
    ViewportGated { root_margin: f64 },
}

impl RevealPolicy {
    pub fn for_fold(fold: FoldClass, settings: &RevealSettings) -> Self {
        match fold {
            FoldClass::AboveFold => RevealPolicy::Immediate,
            FoldClass::BelowFold => RevealPolicy::ViewportGated {
                root_margin: settings.root_margin,
            },
        }
    }

    /// Value of the `data-reveal` attribute read by `reveal.js`.
    pub fn attr(&self) -> &'static str {
        match self {
            RevealPolicy::Immediate => "immediate",
            RevealPolicy::ViewportGated { .. } => "viewport",
        }
    }
}

/// Per-block reveal parameters supplied by the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSpec {
    pub fold: FoldClass,
    pub direction: Direction,
    /// Stagger before the transition begins, counted from the trigger.
    pub delay: Duration,
}

impl RevealSpec {
    pub fn above_fold() -> Self {
        Self {
            fold: FoldClass::AboveFold,
            direction: Direction::Up,
            delay: Duration::ZERO,
        }
    }

    pub fn below_fold() -> Self {
        Self {
            fold: FoldClass::BelowFold,
            ..Self::above_fold()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the delay in seconds. Negative and NaN values clamp to zero.
    pub fn with_delay_secs(mut self, secs: f64) -> Self {
        self.delay = Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX);
        self
    }

    pub fn policy(&self, settings: &RevealSettings) -> RevealPolicy {
        RevealPolicy::for_fold(self.fold, settings)
    }

    /// Wrap `content` in a reveal container.
    ///
    /// The hidden offset and delay travel as CSS custom properties; the
    /// stylesheet turns them into a transform. Nothing here touches opacity,
    /// so the text is readable with or without scripts.
    pub fn render(&self, settings: &RevealSettings, class: Option<&str>, content: Markup) -> Markup {
        let (x, y) = self.direction.offset(settings.offset);
        let style = format!(
            "--reveal-x: {}px; --reveal-y: {}px; --reveal-delay: {}s;",
            positive_zero(x),
            positive_zero(y),
            self.delay.as_secs_f64()
        );
        let class = match class {
            Some(extra) => format!("reveal {extra}"),
            None => "reveal".to_string(),
        };
        html! {
            div class=(class) data-reveal=(self.policy(settings).attr()) style=(style) {
                (content)
            }
        }
    }
}

/// Opaque block identity issued by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// Rendered transform of a block at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualFrame {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
}

/// Opacity of every frame, hidden or visible.
pub const FULL_OPACITY: f64 = 1.0;

// ============================================================================
// Easing
// ============================================================================

/// CSS-style cubic bezier easing with endpoints fixed at (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    pub fn new([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
    }

    fn slope(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    /// Eased value for a linear progress in `[0, 1]`.
    ///
    /// Finds the curve parameter whose x equals `progress` (Newton steps,
    /// falling back to bisection) and returns the y at that parameter.
    pub fn ease(&self, progress: f64) -> f64 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }

        let mut t = progress;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, t) - progress;
            if err.abs() < 1e-7 {
                return Self::sample(self.y1, self.y2, t);
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = progress;
        for _ in 0..64 {
            let x = Self::sample(self.x1, self.x2, t);
            if (x - progress).abs() < 1e-7 {
                break;
            }
            if x < progress {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        Self::sample(self.y1, self.y2, t)
    }
}

// ============================================================================
// Viewport observation
// ============================================================================

/// Result of registering a block for intersection notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The block is registered; an intersection event will follow later.
    Pending,
    /// The block is already inside the (margin-expanded) viewport.
    InView,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObserverError {
    #[error("viewport intersection is not supported")]
    Unsupported,
    #[error("viewport observer failed: {0}")]
    Failed(String),
}

/// Source of "block entered the viewport" notifications.
///
/// Notifications are delivered by the host calling
/// [`RevealScheduler::on_intersection`]; the observer only tracks
/// registrations. `unobserve` may be called for blocks that are not
/// registered and must tolerate it.
pub trait ViewportObserver {
    fn observe(&mut self, block: BlockId, root_margin: f64) -> Result<Observation, ObserverError>;
    fn unobserve(&mut self, block: BlockId);
}

/// Observer whose intersection events are fed by hand.
///
/// Used by the `reveal` CLI command and by tests. An unsupported instance
/// refuses every registration, which exercises the fail-open path.
#[derive(Debug, Default)]
pub struct ManualViewport {
    unsupported: bool,
    in_view: BTreeSet<BlockId>,
    observing: BTreeSet<BlockId>,
    released: Vec<BlockId>,
}

impl ManualViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Self::default()
        }
    }

    /// Report `block` as already in view when it registers.
    pub fn start_in_view(&mut self, block: BlockId) {
        self.in_view.insert(block);
    }

    pub fn is_observing(&self, block: BlockId) -> bool {
        self.observing.contains(&block)
    }

    /// Every block released so far, in release order.
    pub fn released(&self) -> &[BlockId] {
        &self.released
    }
}

impl ViewportObserver for ManualViewport {
    fn observe(&mut self, block: BlockId, _root_margin: f64) -> Result<Observation, ObserverError> {
        if self.unsupported {
            return Err(ObserverError::Unsupported);
        }
        if self.in_view.contains(&block) {
            return Ok(Observation::InView);
        }
        self.observing.insert(block);
        Ok(Observation::Pending)
    }

    fn unobserve(&mut self, block: BlockId) {
        if self.observing.remove(&block) {
            self.released.push(block);
        }
    }
}

// ============================================================================
// Scheduler
// ============================================================================

/// A mounted block and its one-shot state.
#[derive(Debug, Clone)]
pub struct RevealBlock {
    pub id: BlockId,
    pub spec: RevealSpec,
    state: RevealState,
    triggered_at: Option<Duration>,
    observing: bool,
}

impl RevealBlock {
    fn new(id: BlockId, spec: RevealSpec) -> Self {
        Self {
            id,
            spec,
            state: RevealState::Hidden,
            triggered_at: None,
            observing: false,
        }
    }

    fn trigger(&mut self, now: Duration) {
        if self.state == RevealState::Hidden {
            self.state = RevealState::Visible;
            self.triggered_at = Some(now);
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn triggered_at(&self) -> Option<Duration> {
        self.triggered_at
    }

    fn frame(&self, now: Duration, settings: &RevealSettings, easing: &CubicBezier) -> VisualFrame {
        let (dx, dy) = self.spec.direction.offset(settings.offset);
        let remaining = match self.triggered_at {
            None => 1.0,
            Some(at) => {
                let start = at.saturating_add(self.spec.delay);
                if now <= start {
                    1.0
                } else {
                    let progress = (now - start).as_secs_f64() / settings.duration;
                    1.0 - easing.ease(progress.min(1.0))
                }
            }
        };
        VisualFrame {
            x: positive_zero(dx * remaining),
            y: positive_zero(dy * remaining),
            opacity: FULL_OPACITY,
        }
    }
}

/// Owns the reveal state of every mounted block on a page.
///
/// Time is the caller's clock, expressed as elapsed time since page load.
pub struct RevealScheduler<O> {
    settings: RevealSettings,
    easing: CubicBezier,
    observer: O,
    blocks: BTreeMap<BlockId, RevealBlock>,
    next_id: u64,
}

impl<O: ViewportObserver> RevealScheduler<O> {
    pub fn new(settings: RevealSettings, observer: O) -> Self {
        let easing = CubicBezier::new(settings.easing);
        Self {
            settings,
            easing,
            observer,
            blocks: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Id the next `mount` call will assign.
    pub fn peek_next_id(&self) -> BlockId {
        BlockId(self.next_id)
    }

    /// Mount a block and decide its trigger.
    pub fn mount(&mut self, spec: RevealSpec, now: Duration) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;

        let mut block = RevealBlock::new(id, spec);
        match spec.policy(&self.settings) {
            RevealPolicy::Immediate => block.trigger(now),
            RevealPolicy::ViewportGated { root_margin } => {
                match self.observer.observe(id, root_margin) {
                    Ok(Observation::Pending) => block.observing = true,
                    Ok(Observation::InView) => block.trigger(now),
                    // Fail open: a missing mechanism must not keep content hidden
                    Err(_) => block.trigger(now),
                }
            }
        }
        self.blocks.insert(id, block);
        id
    }

    /// Deliver an intersection event. Returns `true` if it flipped the block.
    ///
    /// Events for unknown, unmounted, or already visible blocks are ignored.
    pub fn on_intersection(&mut self, id: BlockId, now: Duration) -> bool {
        let Some(block) = self.blocks.get_mut(&id) else {
            return false;
        };
        if block.state == RevealState::Visible {
            return false;
        }
        block.trigger(now);
        if block.observing {
            block.observing = false;
            self.observer.unobserve(id);
        }
        true
    }

    /// Remove a block, releasing its observation if one is pending.
    pub fn unmount(&mut self, id: BlockId) {
        if let Some(block) = self.blocks.remove(&id) {
            if block.observing {
                self.observer.unobserve(id);
            }
        }
    }

    pub fn block(&self, id: BlockId) -> Option<&RevealBlock> {
        self.blocks.get(&id)
    }

    pub fn state(&self, id: BlockId) -> Option<RevealState> {
        self.blocks.get(&id).map(RevealBlock::state)
    }

    pub fn frame(&self, id: BlockId, now: Duration) -> Option<VisualFrame> {
        self.blocks
            .get(&id)
            .map(|b| b.frame(now, &self.settings, &self.easing))
    }

    /// Time at which the block reaches its resting position, once triggered.
    pub fn settles_at(&self, id: BlockId) -> Option<Duration> {
        let block = self.blocks.get(&id)?;
        let at = block.triggered_at?;
        let duration = Duration::try_from_secs_f64(self.settings.duration).unwrap_or(Duration::ZERO);
        at.checked_add(block.spec.delay)?.checked_add(duration)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

// ============================================================================
// Timeline sampling
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineSample {
    pub at: Duration,
    pub state: RevealState,
    pub frame: VisualFrame,
}

/// Options for [`timeline`].
#[derive(Debug, Clone, Copy)]
pub struct TimelineOptions {
    /// When the block enters the viewport, if ever.
    pub enter_at: Option<Duration>,
    /// Simulate a platform without intersection support.
    pub observer_supported: bool,
    pub step: Duration,
    pub until: Duration,
}

/// Upper bound on the samples one [`timeline`] call produces.
pub const MAX_TIMELINE_SAMPLES: usize = 10_000;

/// Mount one block at time zero and sample it at fixed steps.
///
/// Sampling stops at `until` or after [`MAX_TIMELINE_SAMPLES`] samples,
/// whichever comes first.
pub fn timeline(
    spec: RevealSpec,
    settings: &RevealSettings,
    options: TimelineOptions,
) -> Vec<TimelineSample> {
    let observer = if options.observer_supported {
        ManualViewport::new()
    } else {
        ManualViewport::unsupported()
    };
    let mut scheduler = RevealScheduler::new(settings.clone(), observer);
    let id = scheduler.mount(spec, Duration::ZERO);

    let mut samples = Vec::new();
    if options.step.is_zero() {
        return samples;
    }

    let mut entered = false;
    let mut at = Duration::ZERO;
    while at <= options.until && samples.len() < MAX_TIMELINE_SAMPLES {
        if let Some(enter_at) = options.enter_at {
            if !entered && enter_at <= at {
                scheduler.on_intersection(id, enter_at);
                entered = true;
            }
        }
        if let (Some(state), Some(frame)) = (scheduler.state(id), scheduler.frame(id, at)) {
            samples.push(TimelineSample { at, state, frame });
        }
        match at.checked_add(options.step) {
            Some(next) => at = next,
            None => break,
        }
    }
    samples
}

/// Collapse `-0.0` to `0.0` so rendered values never read "-0".
fn positive_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}
