//! Recording fakes of every host collaborator.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tether_common::BridgeError;

use crate::capability::navigation_bar::{BarItem, BarSide};
use crate::capability::share::{ApplicationActivity, ShareCompletion, ShareItem, ShareOutcome};
use crate::context::{Lifecycle, ScriptContext};
use crate::controller::HostServices;
use crate::host::{NavigationChrome, NavigationContainer, ScriptRuntime, ShareHost, WebContent};
use crate::navigation::{NavigationRequest, PresentationNode};

pub(crate) const NAMESPACE: &str = "NativeBridge";

#[derive(Default)]
pub(crate) struct FakeRuntime {
    scripts: RefCell<Vec<String>>,
    fail_next: Cell<bool>,
}

impl FakeRuntime {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn scripts(&self) -> Vec<String> {
        self.scripts.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.scripts.borrow_mut().clear();
    }

    pub(crate) fn contains(&self, needle: &str) -> bool {
        self.scripts.borrow().iter().any(|s| s.contains(needle))
    }

    pub(crate) fn count(&self, needle: &str) -> usize {
        self.scripts
            .borrow()
            .iter()
            .map(|s| s.matches(needle).count())
            .sum()
    }

    /// Make the next evaluation fail.
    pub(crate) fn fail_next(&self) {
        self.fail_next.set(true);
    }
}

impl ScriptRuntime for FakeRuntime {
    fn evaluate_script(&self, js: &str) -> Result<(), BridgeError> {
        if self.fail_next.replace(false) {
            return Err(BridgeError::Host("evaluation failed".into()));
        }
        self.scripts.borrow_mut().push(js.to_string());
        Ok(())
    }
}

pub(crate) struct FakeContent {
    pub(crate) loads: RefCell<Vec<NavigationRequest>>,
    pub(crate) can_go_back: Cell<bool>,
    pub(crate) back_calls: Cell<usize>,
}

impl FakeContent {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            loads: RefCell::new(Vec::new()),
            can_go_back: Cell::new(false),
            back_calls: Cell::new(0),
        })
    }
}

impl WebContent for FakeContent {
    fn load_request(&self, request: &NavigationRequest) -> Result<(), BridgeError> {
        self.loads.borrow_mut().push(request.clone());
        Ok(())
    }

    fn go_back(&self) -> bool {
        self.back_calls.set(self.back_calls.get() + 1);
        self.can_go_back.get()
    }
}

#[derive(Default)]
pub(crate) struct FakeContainer {
    pub(crate) pushed: RefCell<Vec<PresentationNode>>,
    pub(crate) modals: RefCell<Vec<PresentationNode>>,
}

impl FakeContainer {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl NavigationContainer for FakeContainer {
    fn append_pushed(&self, node: PresentationNode) {
        self.pushed.borrow_mut().push(node);
    }

    fn present_modal(&self, node: PresentationNode) {
        self.modals.borrow_mut().push(node);
    }
}

#[derive(Default)]
pub(crate) struct FakeChrome {
    calls: RefCell<Vec<(BarSide, Vec<BarItem>)>>,
}

impl FakeChrome {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn calls(&self) -> Vec<(BarSide, Vec<BarItem>)> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl NavigationChrome for FakeChrome {
    fn set_items(&self, side: BarSide, items: &[BarItem]) {
        self.calls.borrow_mut().push((side, items.to_vec()));
    }
}

/// One `present_share` call, holding its completion token until a test
/// finishes or drops it.
pub(crate) struct PresentedShare {
    pub(crate) items: Vec<ShareItem>,
    pub(crate) excluded_types: Vec<String>,
    pub(crate) application_activities: Vec<ApplicationActivity>,
    pub(crate) on_complete: Option<ShareCompletion>,
}

#[derive(Default)]
pub(crate) struct FakeShareHost {
    presented: RefCell<Vec<PresentedShare>>,
}

impl FakeShareHost {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn count(&self) -> usize {
        self.presented.borrow().len()
    }

    pub(crate) fn with_last<R>(&self, f: impl FnOnce(&PresentedShare) -> R) -> Option<R> {
        self.presented.borrow().last().map(f)
    }

    pub(crate) fn take_completion(&self, index: usize) -> Option<ShareCompletion> {
        self.presented
            .borrow_mut()
            .get_mut(index)
            .and_then(|p| p.on_complete.take())
    }

    /// Finish the share at `index` the way the system sheet would.
    pub(crate) fn finish(&self, index: usize, outcome: ShareOutcome) {
        // Release the borrow before the completion runs.
        let completion = self.take_completion(index);
        if let Some(completion) = completion {
            completion.finish(outcome);
        }
    }
}

impl ShareHost for FakeShareHost {
    fn present_share(
        &self,
        items: Vec<ShareItem>,
        excluded_types: Vec<String>,
        application_activities: Vec<ApplicationActivity>,
        on_complete: ShareCompletion,
    ) {
        self.presented.borrow_mut().push(PresentedShare {
            items,
            excluded_types,
            application_activities,
            on_complete: Some(on_complete),
        });
    }
}

/// All fakes, with typed handles kept for assertions.
pub(crate) struct Harness {
    pub(crate) runtime: Rc<FakeRuntime>,
    pub(crate) content: Rc<FakeContent>,
    pub(crate) container: Rc<FakeContainer>,
    pub(crate) chrome: Rc<FakeChrome>,
    pub(crate) share: Rc<FakeShareHost>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self {
            runtime: FakeRuntime::new(),
            content: FakeContent::new(),
            container: FakeContainer::new(),
            chrome: FakeChrome::new(),
            share: FakeShareHost::new(),
        }
    }

    pub(crate) fn services(&self) -> HostServices {
        HostServices {
            runtime: self.runtime.clone(),
            content: self.content.clone(),
            container: self.container.clone(),
            chrome: self.chrome.clone(),
            share: self.share.clone(),
        }
    }
}

/// A lifecycle with one Ready, empty generation.
pub(crate) fn ready_context(runtime: &Rc<FakeRuntime>) -> (Lifecycle, ScriptContext) {
    let mut lifecycle = Lifecycle::new(runtime.clone(), NAMESPACE);
    lifecycle.load_started();
    let ctx = lifecycle
        .context_created(|_| {})
        .expect("fresh context installs");
    (lifecycle, ctx)
}
