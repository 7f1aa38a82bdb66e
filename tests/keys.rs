#[allow(dead_code)]
#[macro_use]
mod common;

use chipbox::{InteractionState, Position};
use common::harness::TestHarness;

fn state(h: &TestHarness) -> InteractionState {
    h.chipbox.app().controller.state()
}

fn highlighted_chip(h: &TestHarness) -> Option<&str> {
    h.chipbox.app().controller.highlighted_chip()
}

fn highlighted_row(h: &TestHarness) -> Option<&str> {
    h.chipbox.app().controller.highlighted_suggestion()
}

box_test!(keys_typing_filters_the_dropdown, &[], {
    @line 1 == "Search...";
    @dropdown [];
    @type "har";
    @line 1 == "har";
    @dropdown ["Haryana"];
    @line 2 == format!("┌{}┐", "─".repeat(38));
    @line 3 == format!("│ ◉ Haryana{}│", " ".repeat(28));
    @line 4 == format!("└{}┘", "─".repeat(38));
    @assert(|h: &TestHarness| h.chipbox.app().cursor_pos == (3, 1));
    @assert(|h: &TestHarness| state(h) == InteractionState::Typing);
});

box_test!(keys_query_is_case_insensitive, &[], {
    @type "HIM";
    @dropdown ["Himachal Pradesh"];
    @type "x";
    @dropdown [];
    @assert(|h: &TestHarness| h.chipbox.app().controller.is_visible());
});

box_test!(keys_enter_selects_highlighted_row, &[], {
    @type "har";
    @key Down;
    @assert(|h: &TestHarness| highlighted_row(h) == Some("Haryana"));
    @key Enter;
    @selected ["Haryana"];
    @line 1 == " ◉ Haryana x";
    @line 2 == "─".repeat(40);
    @dropdown [];
    @assert(|h: &TestHarness| h.query().is_empty());
    @assert(|h: &TestHarness| h.app_exit_code().is_none());
    @key Enter;
    @exited 0;
});

box_test!(keys_tab_selects_only_with_a_highlight, &[], {
    @type "a";
    @key Tab;
    @selected [];
    @key Up;
    @assert(|h: &TestHarness| highlighted_row(h) == Some("Himachal Pradesh"));
    @key Tab;
    @selected ["Himachal Pradesh"];
    @type "e";
    @dropdown ["New Delhi", "Telegana"];
    @key Down;
    @key Down;
    @key Tab;
    @selected ["Himachal Pradesh", "Telegana"];
});

box_test!(keys_arrows_open_then_wrap, &[], {
    @key Up;
    @dropdown ["New Delhi", "Haryana", "Telegana", "Karnataka", "Himachal Pradesh"];
    @assert(|h: &TestHarness| highlighted_row(h).is_none());
    @key Up;
    @assert(|h: &TestHarness| highlighted_row(h) == Some("Himachal Pradesh"));
    @key Down;
    @assert(|h: &TestHarness| highlighted_row(h) == Some("New Delhi"));
    @ctrl 'p';
    @assert(|h: &TestHarness| highlighted_row(h) == Some("Himachal Pradesh"));
});

box_test!(keys_backspace_highlights_then_removes_last_chip, &[], {
    @type "har";
    @key Down;
    @key Enter;
    @type "kar";
    @key Down;
    @key Enter;
    @selected ["Haryana", "Karnataka"];
    @key Backspace;
    @selected ["Haryana", "Karnataka"];
    @assert(|h: &TestHarness| highlighted_chip(h) == Some("Karnataka"));
    @key Backspace;
    @selected ["Haryana"];
    @assert(|h: &TestHarness| state(h) == InteractionState::Idle);
    @assert(|h: &TestHarness| h.anchor() == Some(Position { top: 2, left: 14 }));
    @dropdown [];
    @line 1 == " ◉ Haryana x";
    @key Backspace;
    @assert(|h: &TestHarness| highlighted_chip(h) == Some("Haryana"));
    @key Backspace;
    @selected [];
    @assert(|h: &TestHarness| h.anchor() == Some(Position { top: 2, left: 0 }));
    @line 1 == "Search...";
    @key Backspace;
    @assert(|h: &TestHarness| state(h) == InteractionState::Idle);
});

box_test!(keys_backspace_edits_a_nonempty_query, &[], {
    @type "har";
    @key Down;
    @key Enter;
    @type "kar";
    @key Backspace;
    @line 1 == " ◉ Haryana x  ka";
    @dropdown ["Karnataka"];
    @selected ["Haryana"];
    @assert(|h: &TestHarness| highlighted_chip(h).is_none());
    @key Backspace;
    @key Backspace;
    @dropdown ["New Delhi", "Telegana", "Karnataka", "Himachal Pradesh"];
    @selected ["Haryana"];
});

box_test!(keys_typing_clears_a_chip_highlight, &[], {
    @type "goa";
    @ctrl 'u';
    @key Up;
    @key Enter;
    @selected ["Himachal Pradesh"];
    @key Backspace;
    @assert(|h: &TestHarness| highlighted_chip(h) == Some("Himachal Pradesh"));
    @char 'n';
    @assert(|h: &TestHarness| highlighted_chip(h).is_none());
    @key Backspace;
    @selected ["Himachal Pradesh"];
    @assert(|h: &TestHarness| highlighted_chip(h).is_none());
});

box_test!(keys_line_editing, &[], {
    @type "deli";
    @key Left;
    @char 'h';
    @line 1 == "delhi";
    @key Home;
    @key Delete;
    @line 1 == "elhi";
    @key End;
    @ctrl 'h';
    @line 1 == "elh";
    @dropdown ["New Delhi"];
    @ctrl 'u';
    @line 1 == "Search...";
    @dropdown ["New Delhi", "Haryana", "Telegana", "Karnataka", "Himachal Pradesh"];
});

box_test!(keys_escape_closes_then_aborts, &[], {
    @type "a";
    @key Esc;
    @dropdown [];
    @assert(|h: &TestHarness| h.app_exit_code().is_none());
    @key Esc;
    @exited 130;
});

box_test!(keys_escape_clears_chip_highlight_first, &[], {
    @type "goa";
    @ctrl 'u';
    @key Down;
    @key Enter;
    @key Backspace;
    @key Esc;
    @assert(|h: &TestHarness| highlighted_chip(h).is_none());
    @selected ["New Delhi"];
    @assert(|h: &TestHarness| h.app_exit_code().is_none());
    @key Esc;
    @exited 130;
});

box_test!(keys_ctrl_c_aborts, &[], {
    @type "tel";
    @key Down;
    @key Enter;
    @ctrl 'c';
    @selected ["Telegana"];
    @exited 130;
});

box_test!(keys_accept_with_empty_selection, &[], {
    @key Enter;
    @exited 1;
});

box_test!(keys_bound_action_chain, &["--bind", "tab:select+accept"], {
    @type "tel";
    @key Down;
    @key Tab;
    @selected ["Telegana"];
    @exited 0;
});

box_test!(keys_bound_show_suggestions, &["--bind", "ctrl-o:show-suggestions,ctrl-x:abort"], {
    @ctrl 'o';
    @dropdown ["New Delhi", "Haryana", "Telegana", "Karnataka", "Himachal Pradesh"];
    @ctrl 'x';
    @exited 130;
});

box_test!(keys_paste_replaces_control_chars, &[], {
    @paste "new\ndelhi";
    @line 1 == "new delhi";
    @dropdown ["New Delhi"];
});
