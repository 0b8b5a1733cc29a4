use artillery_client::{
    parse_field, Action, ApiRequest, FormField, FormOutcome, InputForm, Key,
};

fn type_text(form: &mut InputForm, text: &str) {
    for ch in text.chars() {
        assert_eq!(form.handle_key(Key::Char(ch)), FormOutcome::Pending);
    }
}

fn xy_form() -> InputForm {
    InputForm::new("Add Unit", vec![FormField::float("x"), FormField::float("y")])
}

#[test]
fn two_fields_submit_parsed_values() {
    let mut form = xy_form();
    type_text(&mut form, "3.5");
    form.handle_key(Key::Down);
    type_text(&mut form, "-2");

    match form.handle_key(Key::Enter) {
        FormOutcome::Submitted(values) => {
            assert_eq!(values.get("x"), Some(3.5));
            assert_eq!(values.get("y"), Some(-2.0));
        }
        other => panic!("expected submission, got {:?}", other),
    }
}

#[test]
fn empty_index_submits_none_and_defaults_to_zero() {
    let mut form = InputForm::new("Delete Unit", vec![FormField::index("idx")]);
    let values = match form.handle_key(Key::Enter) {
        FormOutcome::Submitted(values) => values,
        other => panic!("expected submission, got {:?}", other),
    };
    assert_eq!(values.get("idx"), None);
    assert_eq!(values.entries().len(), 1);
    assert_eq!(
        Action::DeleteUnit.request(Some(&values)),
        Ok(ApiRequest::DeleteUnit(0))
    );
}

#[test]
fn bare_minus_is_none() {
    let mut form = xy_form();
    type_text(&mut form, "-");
    let FormOutcome::Submitted(values) = form.handle_key(Key::Enter) else {
        panic!("expected submission");
    };
    assert_eq!(values.get("x"), None);
    assert_eq!(values.get("y"), None);
}

#[test]
fn selection_wraps_both_ways() {
    let mut form = InputForm::new(
        "Set Destination",
        vec![FormField::float("x"), FormField::float("y"), FormField::index("idx")],
    );
    assert_eq!(form.selected(), 0);
    form.handle_key(Key::Up);
    assert_eq!(form.selected(), 2);
    form.handle_key(Key::Down);
    assert_eq!(form.selected(), 0);
    form.handle_key(Key::Tab);
    assert_eq!(form.selected(), 1);
}

#[test]
fn q_and_escape_cancel() {
    for key in [Key::Char('q'), Key::Char('Q'), Key::Esc, Key::Interrupt] {
        let mut form = xy_form();
        type_text(&mut form, "12");
        assert_eq!(form.handle_key(key), FormOutcome::Cancelled);
    }
}

#[test]
fn letters_are_not_typed() {
    let mut form = xy_form();
    form.handle_key(Key::Char('a'));
    form.handle_key(Key::Char('1'));
    form.handle_key(Key::Char('e'));
    assert_eq!(form.text(0), Some("1"));
}

#[test]
fn index_fields_take_digits_only() {
    let mut form = InputForm::new("Delete Unit", vec![FormField::index("idx")]);
    type_text(&mut form, "-1.5");
    assert_eq!(form.text(0), Some("15"));
}

#[test]
fn cursor_editing() {
    let mut form = xy_form();
    type_text(&mut form, "125");
    form.handle_key(Key::Left);
    form.handle_key(Key::Backspace);
    assert_eq!(form.text(0), Some("15"));

    form.handle_key(Key::Home);
    form.handle_key(Key::Char('-'));
    assert_eq!(form.text(0), Some("-15"));

    form.handle_key(Key::Delete);
    assert_eq!(form.text(0), Some("-5"));

    form.handle_key(Key::End);
    form.handle_key(Key::Char('.'));
    form.handle_key(Key::Char('5'));
    assert_eq!(form.text(0), Some("-5.5"));
}

#[test]
fn fields_keep_their_own_text() {
    let mut form = xy_form();
    type_text(&mut form, "1");
    form.handle_key(Key::Down);
    type_text(&mut form, "2");
    form.handle_key(Key::Up);
    type_text(&mut form, "0");
    assert_eq!(form.text(0), Some("10"));
    assert_eq!(form.text(1), Some("2"));
}

#[test]
fn field_capacity_is_enforced() {
    let mut form = xy_form();
    type_text(&mut form, &"9".repeat(40));
    assert_eq!(form.text(0).map(str::len), Some(artillery_client::FIELD_CAPACITY));
}

#[test]
fn parse_field_edge_cases() {
    assert_eq!(parse_field(""), None);
    assert_eq!(parse_field("-"), None);
    assert_eq!(parse_field("."), None);
    assert_eq!(parse_field("1-2"), None);
    assert_eq!(parse_field("1.2.3"), None);
    assert_eq!(parse_field("-0.25"), Some(-0.25));
    assert_eq!(parse_field("7"), Some(7.0));
}

#[test]
fn render_shows_title_labels_and_text() {
    let mut form = xy_form();
    type_text(&mut form, "42");
    let canvas = form.render();
    assert!(canvas.row_text(0).contains("Add Unit"));
    assert!(canvas.row_text(1).starts_with("x 42"));
    assert!(canvas.row_text(2).starts_with("y"));
}
