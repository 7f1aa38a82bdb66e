#[allow(dead_code)]
#[macro_use]
mod common;

use chipbox::Catalog;
use chipbox::tui::event::Action;
use color_eyre::Result;
use common::harness::{TestHarness, enter_sized, parse_options};

box_test!(layout_initial_screen, &[], {
    @line 0 == "Select all the states";
    @line 1 == "Search...";
    @line 2 == "─".repeat(40);
    @line 3 == "";
    @assert(|h: &TestHarness| h.chipbox.app().cursor_pos == (0, 1));
});

box_test!(layout_no_header, &["--no-header"], {
    @line 0 == "Search...";
    @line 1 == "─".repeat(40);
    @click 3, 0;
    @assert(|h: &TestHarness| h.anchor() == Some(chipbox::Position { top: 1, left: 0 }));
    @line 1 == format!("┌{}┐", "─".repeat(38));
});

box_test!(layout_custom_texts, &["--header", "Pick", "--placeholder", "Type here", "--prompt", "> "], {
    @line 0 == "Pick";
    @line 1 == "> Type here";
    @type "go";
    @line 1 == "> go";
    @assert(|h: &TestHarness| h.chipbox.app().cursor_pos == (4, 1));
});

box_test!(layout_placeholder_only_while_nothing_is_selected, &[], {
    @type "goa";
    @line 1 == "goa";
    @action UnixLineDiscard;
    @line 1 == "Search...";
    @key Down;
    @key Enter;
    @line 1 == " ◉ New Delhi x";
});

box_test!(layout_chips_wrap, &[], {
    @key Up; @key Down; @key Enter;
    @key Up; @key Down; @key Enter;
    @key Up; @key Down; @key Enter;
    @key Up; @key Down; @key Enter;
    @key Up; @key Down; @key Enter;
    @selected ["New Delhi", "Haryana", "Telegana", "Karnataka", "Himachal Pradesh"];
    @line 1 == " ◉ New Delhi x   ◉ Haryana x";
    @line 2 == " ◉ Telegana x   ◉ Karnataka x";
    @line 3 == " ◉ Himachal Pradesh x";
    @line 4 == "─".repeat(40);
    @assert(|h: &TestHarness| h.chipbox.app().cursor_pos == (23, 3));
    @key Up;
    @dropdown [];
    @assert(|h: &TestHarness| h.anchor() == Some(chipbox::Position { top: 4, left: 23 }));
});

box_test!(layout_dropdown_height, &["--dropdown-height", "3"], {
    @click 3, 1;
    @dropdown ["New Delhi", "Haryana", "Telegana"];
    @line 6 == format!("└{}┘", "─".repeat(38));
});

box_test!(layout_dropdown_width, &["--dropdown-width", "50%"], {
    @click 3, 1;
    @line 2 == format!("┌{}┐{}", "─".repeat(18), "─".repeat(20));
    @line 3 == format!("│ ◉ New Delhi{}│", " ".repeat(6));
});

#[test]
fn layout_dropdown_scrolls_in_little_room() -> Result<()> {
    let mut h = enter_sized(parse_options(&[]), Catalog::regions(), 40, 6)?;
    h.click(3, 1)?;
    assert_eq!(h.dropdown(), ["New Delhi", "Haryana"]);
    h.action(Action::Down(3))?;
    assert_eq!(h.dropdown(), ["Haryana", "Telegana"]);
    h.action(Action::Down(2))?;
    assert_eq!(h.dropdown(), ["Karnataka", "Himachal Pradesh"]);
    h.action(Action::Down(1))?;
    assert_eq!(h.dropdown(), ["New Delhi", "Haryana"]);
    Ok(())
}

#[test]
fn layout_follows_resize() -> Result<()> {
    let mut h = enter_sized(parse_options(&[]), Catalog::regions(), 40, 12)?;
    for _ in 0..2 {
        h.action(Action::ShowSuggestions)?;
        h.action(Action::Down(1))?;
        h.action(Action::Accept)?;
    }
    assert_eq!(h.line(1), " ◉ New Delhi x   ◉ Haryana x");

    h.chipbox.tui_mut().backend_mut().resize(24, 12);
    h.send(chipbox::tui::Event::Resize)?;
    h.tick()?;
    assert_eq!(h.line(1), " ◉ New Delhi x");
    assert_eq!(h.line(2), " ◉ Haryana x");
    assert_eq!(h.line(3), "─".repeat(24));

    h.action(Action::ShowSuggestions)?;
    assert_eq!(h.anchor(), Some(chipbox::Position { top: 3, left: 14 }));
    Ok(())
}

box_test!(layout_redraw_keeps_state, &["--bind", "ctrl-l:redraw"], {
    @type "tel";
    @ctrl 'l';
    @line 0 == "Select all the states";
    @line 1 == "tel";
    @dropdown ["Telegana"];
});
