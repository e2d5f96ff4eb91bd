use neatfmt::{highlight, Dialect, SpanKind};

fn kinds(line: &[neatfmt::HighlightSpan]) -> Vec<SpanKind> {
    line.iter().map(|span| span.kind).collect()
}

#[test]
fn function_wins_over_keyword_at_the_same_offset() {
    let lines = highlight("SELECT SUM(1) FROM t", Dialect::MySql);
    assert_eq!(
        kinds(&lines[0]),
        vec![
            SpanKind::Keyword,
            SpanKind::Function,
            SpanKind::NumberLit,
            SpanKind::Keyword,
        ]
    );
    let sum = lines[0][1];
    assert_eq!(&"SELECT SUM(1) FROM t"[sum.start..sum.end], "SUM");
}

#[test]
fn earliest_start_wins_overlaps() {
    // The string literal opens before the keyword inside it.
    let lines = highlight("WHERE x = 'select ok'", Dialect::MySql);
    assert_eq!(kinds(&lines[0]), vec![SpanKind::Keyword, SpanKind::StringLit]);
}

#[test]
fn spans_are_reported_per_line() {
    let lines = highlight("SELECT\n    'x'\nFROM t", Dialect::MySql);
    assert_eq!(lines.len(), 3);
    assert_eq!(kinds(&lines[0]), vec![SpanKind::Keyword]);
    assert_eq!(kinds(&lines[1]), vec![SpanKind::StringLit]);
    assert_eq!(kinds(&lines[2]), vec![SpanKind::Keyword]);
}

#[test]
fn mongo_strings_suppress_operators_they_contain() {
    let lines = highlight("\"$gt\": 5, $lt", Dialect::Mongo);
    assert_eq!(
        kinds(&lines[0]),
        vec![SpanKind::StringLit, SpanKind::NumberLit, SpanKind::Keyword]
    );
}

#[test]
fn mongo_method_names_are_keywords_outside_strings() {
    let lines = highlight("db.users.find({\"name\": \"find\"})", Dialect::Mongo);
    let line = &lines[0];
    // db and find highlighted as keywords; the quoted "find" is a string.
    let keyword_count = line.iter().filter(|s| s.kind == SpanKind::Keyword).count();
    let string_count = line.iter().filter(|s| s.kind == SpanKind::StringLit).count();
    assert_eq!(keyword_count, 2);
    assert_eq!(string_count, 2);
}
