use std::cell::RefCell;

use super::*;
use crate::testing::FakeContainer;

fn machine() -> NavigationStateMachine {
    NavigationStateMachine::new(
        [TriggerKind::UserClick],
        Box::new(TriggerClassifier::default()),
    )
}

#[derive(Default)]
struct Hooks {
    open: Option<bool>,
    rewrite_to: Option<&'static str>,
    take_modals: bool,
    asked: RefCell<Vec<String>>,
    taken: RefCell<Vec<PresentationNode>>,
}

impl ControllerDelegate for Hooks {
    fn should_open_request(&self, request: &NavigationRequest) -> Option<bool> {
        self.asked.borrow_mut().push(request.url.clone());
        self.open
    }

    fn rewrite_request(&self, request: &NavigationRequest) -> Option<NavigationRequest> {
        self.rewrite_to.map(|url| {
            let mut rewritten = request.clone().with_header("X-App", "1");
            rewritten.url = url.to_string();
            rewritten
        })
    }

    fn present_modal(&self, node: PresentationNode) -> Option<PresentationNode> {
        if self.take_modals {
            self.taken.borrow_mut().push(node);
            None
        } else {
            Some(node)
        }
    }
}

#[test]
fn user_click_pushes_one_node() {
    let container = FakeContainer::new();
    let mut sm = machine();
    assert_eq!(sm.state(), LoadState::None);

    let outcome = sm.handle(
        NavigationIntent::user_click("https://a.test/next"),
        None,
        &*container,
    );

    assert_eq!(sm.state(), LoadState::UrlLoaded);
    let pushed = container.pushed.borrow();
    assert_eq!(pushed.len(), 1);
    assert_eq!(outcome, NavigationOutcome::Pushed(pushed[0].id));
    assert_eq!(pushed[0].mode, PresentationMode::Pushed);
    assert_eq!(
        pushed[0].content,
        ContentRef::Request(NavigationRequest::new("https://a.test/next"))
    );
}

#[test]
fn declined_request_is_forwarded_unchanged() {
    let container = FakeContainer::new();
    let hooks = Hooks {
        open: Some(false),
        rewrite_to: Some("https://rewritten.test/"),
        ..Hooks::default()
    };
    let mut sm = machine();
    let request = NavigationRequest::new("https://a.test/out").with_header("Accept", "text/html");

    let outcome = sm.handle(
        NavigationIntent::new(request.clone(), TriggerKind::UserClick),
        Some(&hooks),
        &*container,
    );

    assert_eq!(outcome, NavigationOutcome::Forwarded(request));
    assert!(container.pushed.borrow().is_empty());
    assert!(container.modals.borrow().is_empty());
    assert_eq!(sm.state(), LoadState::None);
}

#[test]
fn unhandled_trigger_skips_delegate_and_forwards() {
    let container = FakeContainer::new();
    let hooks = Hooks::default();
    let mut sm = machine();
    let request = NavigationRequest::new("https://a.test/form");

    let outcome = sm.handle(
        NavigationIntent::new(request.clone(), TriggerKind::FormSubmission),
        Some(&hooks),
        &*container,
    );

    assert_eq!(outcome, NavigationOutcome::Forwarded(request));
    assert!(hooks.asked.borrow().is_empty());
    assert!(container.pushed.borrow().is_empty());
}

#[test]
fn rewrite_applies_to_pushed_request() {
    let container = FakeContainer::new();
    let hooks = Hooks {
        rewrite_to: Some("https://b.test/landing"),
        ..Hooks::default()
    };
    let mut sm = machine();

    sm.handle(
        NavigationIntent::user_click("https://a.test/"),
        Some(&hooks),
        &*container,
    );

    let pushed = container.pushed.borrow();
    let ContentRef::Request(request) = &pushed[0].content else {
        panic!("expected a request node");
    };
    assert_eq!(request.url, "https://b.test/landing");
    assert_eq!(request.headers.get("X-App").map(String::as_str), Some("1"));
}

#[test]
fn history_intent_never_pushes() {
    let container = FakeContainer::new();
    let hooks = Hooks::default();
    let mut sm = machine();
    sm.record_load("https://a.test/app");

    let outcome = sm.handle(
        NavigationIntent::new(
            NavigationRequest::new("https://a.test/app/cart"),
            TriggerKind::HistoryPush,
        ),
        Some(&hooks),
        &*container,
    );

    assert_eq!(outcome, NavigationOutcome::HistoryNavigated);
    assert_eq!(sm.state(), LoadState::HistoryStackNavigated);
    assert_eq!(sm.current_url(), Some("https://a.test/app/cart"));
    assert!(hooks.asked.borrow().is_empty());
    assert!(container.pushed.borrow().is_empty());
}

#[test]
fn fragment_jump_is_history_stack() {
    let container = FakeContainer::new();
    let mut sm = machine();
    sm.record_load("https://a.test/doc");

    let outcome = sm.handle(
        NavigationIntent::user_click("https://a.test/doc#section-2"),
        None,
        &*container,
    );
    assert_eq!(outcome, NavigationOutcome::HistoryNavigated);
    assert!(container.pushed.borrow().is_empty());
}

#[test]
fn modal_goes_to_container_without_state_change() {
    let container = FakeContainer::new();
    let mut sm = machine();
    sm.record_load("https://a.test/");

    let id = sm.present_modal(
        ContentRef::Html("<p>hi</p>".into()),
        Some("Terms".into()),
        None,
        &*container,
    );

    assert_eq!(sm.state(), LoadState::UrlLoaded);
    let modals = container.modals.borrow();
    assert_eq!(modals.len(), 1);
    assert_eq!(modals[0].id, id);
    assert_eq!(modals[0].mode, PresentationMode::Modal);
    assert_eq!(modals[0].title.as_deref(), Some("Terms"));
}

#[test]
fn modal_taken_by_delegate() {
    let container = FakeContainer::new();
    let hooks = Hooks {
        take_modals: true,
        ..Hooks::default()
    };
    let sm = machine();

    sm.present_modal(
        ContentRef::Request(NavigationRequest::new("https://a.test/login")),
        None,
        Some(&hooks),
        &*container,
    );

    assert!(container.modals.borrow().is_empty());
    assert_eq!(hooks.taken.borrow().len(), 1);
    assert_eq!(sm.state(), LoadState::None);
}

#[test]
fn programmatic_push_keeps_title() {
    let container = FakeContainer::new();
    let mut sm = machine();
    sm.push(
        NavigationRequest::new("https://a.test/detail"),
        Some("Detail".into()),
        None,
        &*container,
    );
    assert_eq!(sm.state(), LoadState::UrlLoaded);
    assert_eq!(
        container.pushed.borrow()[0].title.as_deref(),
        Some("Detail")
    );
}
