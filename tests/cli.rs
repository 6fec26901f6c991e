use assert_cmd::Command;
use predicates::prelude::*;

mod common;

use common::Layout;

fn bboxtrim() -> Command {
    Command::cargo_bin("bboxtrim").unwrap()
}

#[test]
fn outputs_tool_name() {
    let mut cmd = bboxtrim();
    cmd.arg("-V");
    cmd.assert().success().stdout("bboxtrim 0.1.0\n");
}

#[test]
fn missing_subcommand_fails() {
    bboxtrim().assert().failure();
}

#[test]
fn negative_area_is_rejected() {
    let layout = Layout::new();
    let mut cmd = bboxtrim();
    cmd.args(["list", "--area", "-5", "--xmlpath"])
        .arg(&layout.annotations);
    cmd.assert().failure();
}

// List subcommand tests

#[test]
fn list_prints_all_small_items() {
    let layout = Layout::new();
    layout.add_annotation("big", 100, 100, &[("car", [0, 0, 50, 50])]);
    layout.add_annotation("small", 100, 100, &[("bird", [0, 0, 10, 10])]);

    let mut cmd = bboxtrim();
    cmd.args(["list", "--area", "400", "--xmlpath"])
        .arg(&layout.annotations);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1 of 2 item(s)"))
        .stdout(predicate::str::contains("  small\n"))
        .stdout(predicate::str::contains("big").not());
}

#[test]
fn list_json_output_format() {
    let layout = Layout::new();
    layout.add_annotation("small", 100, 100, &[("bird", [0, 0, 10, 10])]);

    let mut cmd = bboxtrim();
    cmd.args(["list", "--area", "400", "--output", "json", "--xmlpath"])
        .arg(&layout.annotations);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"list\""))
        .stdout(predicate::str::contains("\"status\": \"all_small\""));
}

#[test]
fn list_nonexistent_folder_fails() {
    let mut cmd = bboxtrim();
    cmd.args(["list", "--area", "400", "--xmlpath", "no/such/folder"]);
    cmd.assert().failure().stderr(predicate::str::contains("Error:"));
}

// Crop subcommand tests

#[test]
fn crop_writes_outputs() {
    let layout = Layout::new();
    layout.add_annotation(
        "img1",
        300,
        300,
        &[("car", [10, 10, 50, 50]), ("sign", [45, 45, 60, 60])],
    );
    layout.add_image("img1", "jpg", 300, 300);

    let mut cmd = bboxtrim();
    cmd.args(["crop", "--area", "400", "--imgpath"])
        .arg(&layout.images)
        .arg("--xmlpath")
        .arg(&layout.annotations)
        .arg("--n-imgpath")
        .arg(&layout.out_images)
        .arg("--n-xmlpath")
        .arg(&layout.out_annotations);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Cropped 1 of 1 item(s)"));

    assert!(layout.out_images.join("img1.jpg").is_file());
    assert!(layout.out_annotations.join("img1.xml").is_file());
}

#[test]
fn crop_exits_non_zero_when_an_item_fails() {
    let layout = Layout::new();
    layout.add_annotation("img1", 300, 300, &[("car", [10, 10, 50, 50])]);
    layout.add_image("img1", "jpg", 300, 300);
    layout.add_annotation("empty", 300, 300, &[]);
    layout.add_image("empty", "jpg", 300, 300);

    let mut cmd = bboxtrim();
    cmd.args(["crop", "--area", "400", "--expansion", "all-axes", "--imgpath"])
        .arg(&layout.images)
        .arg("--xmlpath")
        .arg(&layout.annotations)
        .arg("--n-imgpath")
        .arg(&layout.out_images)
        .arg("--n-xmlpath")
        .arg(&layout.out_annotations);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Failures (1):"))
        .stdout(predicate::str::contains("- empty: Item 'empty' has no annotated objects"))
        .stderr(predicate::str::contains("1 of 2 item(s) failed"));

    assert!(layout.out_annotations.join("img1.xml").is_file());
    assert!(!layout.out_images.join("empty.jpg").exists());
}
