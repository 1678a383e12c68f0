use line_diff::{
    CancelGuard, DiffConfig, EditScript, LineSequence, NeverCancel, align, write_context,
    write_normal, write_side_by_side, write_unified,
};

fn seq(lines: &[&str]) -> LineSequence {
    LineSequence::from_lines(lines.iter().map(|s| s.to_string()).collect())
}

fn script_for(a: &LineSequence, b: &LineSequence) -> EditScript {
    let mut guard = CancelGuard::new(&NeverCancel);
    let mut warnings = Vec::new();
    let script = align(a, b, &DiffConfig::default(), &mut guard, &mut warnings)
        .expect("alignment should succeed");
    assert!(warnings.is_empty());
    script
}

fn render_unified(a: &LineSequence, b: &LineSequence, context: u32) -> String {
    let script = script_for(a, b);
    let mut out = Vec::new();
    let mut guard = CancelGuard::new(&NeverCancel);
    write_unified(&mut out, &script, a, b, "A.txt", "B.txt", context, &mut guard)
        .expect("render should succeed");
    String::from_utf8(out).expect("output is utf-8")
}

fn render_context(a: &LineSequence, b: &LineSequence, context: u32) -> String {
    let script = script_for(a, b);
    let mut out = Vec::new();
    let mut guard = CancelGuard::new(&NeverCancel);
    write_context(&mut out, &script, a, b, "A.txt", "B.txt", context, &mut guard)
        .expect("render should succeed");
    String::from_utf8(out).expect("output is utf-8")
}

fn render_normal(a: &LineSequence, b: &LineSequence) -> String {
    let script = script_for(a, b);
    let mut out = Vec::new();
    let mut guard = CancelGuard::new(&NeverCancel);
    write_normal(&mut out, &script, a, b, &mut guard).expect("render should succeed");
    String::from_utf8(out).expect("output is utf-8")
}

fn render_side_by_side(a: &LineSequence, b: &LineSequence) -> String {
    let script = script_for(a, b);
    let mut out = Vec::new();
    let mut guard = CancelGuard::new(&NeverCancel);
    write_side_by_side(&mut out, &script, a, b, &mut guard).expect("render should succeed");
    String::from_utf8(out).expect("output is utf-8")
}

fn numbered(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("l{i}")).collect()
}

#[test]
fn unified_single_change_with_default_context() {
    let a = seq(&["a", "b", "c"]);
    let b = seq(&["a", "x", "c"]);
    assert_eq!(
        render_unified(&a, &b, 3),
        "--- A.txt\n+++ B.txt\n@@ -1,3 +1,3 @@\n a\n-b\n+x\n c\n"
    );
}

#[test]
fn unified_merges_changes_with_overlapping_context() {
    let base = numbered(14);
    let mut changed = base.clone();
    changed[3] = "x4".to_string();
    changed[10] = "y11".to_string();
    let a = LineSequence::from_lines(base);
    let b = LineSequence::from_lines(changed);

    let out = render_unified(&a, &b, 3);
    let hunk_headers = out.lines().filter(|l| l.starts_with("@@")).count();
    assert_eq!(hunk_headers, 1, "expected one hunk: {out}");
    assert!(out.contains("@@ -1,14 +1,14 @@"), "got: {out}");
}

#[test]
fn unified_splits_changes_with_disjoint_context() {
    let base = numbered(14);
    let mut changed = base.clone();
    changed[3] = "x4".to_string();
    changed[11] = "y12".to_string();
    let a = LineSequence::from_lines(base);
    let b = LineSequence::from_lines(changed);

    let out = render_unified(&a, &b, 3);
    let hunk_headers = out.lines().filter(|l| l.starts_with("@@")).count();
    assert_eq!(hunk_headers, 2, "expected two hunks: {out}");
    assert!(out.contains("@@ -1,7 +1,7 @@"), "got: {out}");
    assert!(out.contains("@@ -9,6 +9,6 @@"), "got: {out}");
}

#[test]
fn unified_respects_an_explicit_width() {
    let base = numbered(9);
    let mut changed = base.clone();
    changed[4] = "x5".to_string();
    let a = LineSequence::from_lines(base);
    let b = LineSequence::from_lines(changed);

    let out = render_unified(&a, &b, 1);
    assert_eq!(
        out,
        "--- A.txt\n+++ B.txt\n@@ -4,3 +4,3 @@\n l4\n-l5\n+x5\n l6\n"
    );
}

#[test]
fn unified_reports_an_empty_side_as_position_zero() {
    let a = seq(&["x"]);
    let b = seq(&[]);
    assert_eq!(
        render_unified(&a, &b, 3),
        "--- A.txt\n+++ B.txt\n@@ -1,1 +0,0 @@\n-x\n"
    );
}

#[test]
fn context_change_marks_both_sides() {
    let a = seq(&["a", "b", "c"]);
    let b = seq(&["a", "x", "c"]);
    assert_eq!(
        render_context(&a, &b, 3),
        "*** A.txt\n--- B.txt\n\
         ***************\n\
         *** 1,3 ****\n  a\n! b\n  c\n\
         --- 1,3 ----\n  a\n! x\n  c\n"
    );
}

#[test]
fn context_insertion_prints_only_the_b_body() {
    let a = seq(&["a", "c"]);
    let b = seq(&["a", "b", "c"]);
    assert_eq!(
        render_context(&a, &b, 3),
        "*** A.txt\n--- B.txt\n\
         ***************\n\
         *** 1,2 ****\n\
         --- 1,3 ----\n  a\n+ b\n  c\n"
    );
}

#[test]
fn context_deletion_prints_only_the_a_body() {
    let a = seq(&["a", "b", "c"]);
    let b = seq(&["a", "c"]);
    assert_eq!(
        render_context(&a, &b, 3),
        "*** A.txt\n--- B.txt\n\
         ***************\n\
         *** 1,3 ****\n  a\n- b\n  c\n\
         --- 1,2 ----\n"
    );
}

#[test]
fn normal_multi_line_change_uses_ranges() {
    let a = seq(&["1", "2", "3", "4"]);
    let b = seq(&["1", "x", "y", "4"]);
    assert_eq!(render_normal(&a, &b), "2,3c2,3\n< 2\n< 3\n---\n> x\n> y\n");
}

#[test]
fn normal_delete_names_the_b_position() {
    let a = seq(&["a", "b", "c", "d"]);
    let b = seq(&["a", "d"]);
    assert_eq!(render_normal(&a, &b), "2,3d1\n< b\n< c\n");
}

#[test]
fn normal_append_names_the_a_position() {
    let a = seq(&["a", "d"]);
    let b = seq(&["a", "b", "c", "d"]);
    assert_eq!(render_normal(&a, &b), "1a2,3\n> b\n> c\n");
}

#[test]
fn side_by_side_pads_columns_and_marks_differences() {
    let a = seq(&["same", "old"]);
    let b = seq(&["same", "new"]);
    let expected = format!(
        "{:<40}   {:<40}\n{:<40} | {:<40}\n",
        "same", "same", "old", "new"
    );
    assert_eq!(render_side_by_side(&a, &b), expected);
}

#[test]
fn side_by_side_renders_one_sided_rows_with_empty_counterparts() {
    let a = seq(&["keep"]);
    let b = seq(&["keep", "added"]);
    let expected = format!(
        "{:<40}   {:<40}\n{:<40} | {:<40}\n",
        "keep", "keep", "", "added"
    );
    assert_eq!(render_side_by_side(&a, &b), expected);

    let a = seq(&["keep", "gone"]);
    let b = seq(&["keep"]);
    let expected = format!(
        "{:<40}   {:<40}\n{:<40} | {:<40}\n",
        "keep", "keep", "gone", ""
    );
    assert_eq!(render_side_by_side(&a, &b), expected);
}

#[test]
fn side_by_side_pairs_uneven_replacements() {
    let a = seq(&["one"]);
    let b = seq(&["uno", "dos"]);
    let expected = format!(
        "{:<40} | {:<40}\n{:<40} | {:<40}\n",
        "one", "uno", "", "dos"
    );
    assert_eq!(render_side_by_side(&a, &b), expected);
}
