mod common;

use common::{read_json, stdout_json, SeedFixture};

#[test]
fn scan_writes_ranked_backlog_and_reports() {
    let fixture = SeedFixture::standard();
    let output = fixture.scan("run_test", &[]);
    assert!(
        output.status.success(),
        "scan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let run_dir = fixture.run_dir("run_test");
    for name in ["museums.csv", "artworks.csv", "artists.csv", "exhibitions.csv"] {
        assert!(run_dir.join("copies").join(name).is_file(), "missing copy {name}");
    }

    let backlog = read_json(&run_dir.join("backlog.json"));
    let tasks = backlog["top_museums_to_enrich"].as_array().expect("tasks");
    let ids: Vec<&str> = tasks
        .iter()
        .map(|task| task["museum_id"].as_str().expect("museum_id"))
        .collect();
    assert_eq!(
        ids,
        vec!["agnsw-sydney-au", "art-institute-of-chicago-us", "ngv-melbourne-au"]
    );
    let scores: Vec<u64> = tasks
        .iter()
        .map(|task| task["score"].as_u64().expect("score"))
        .collect();
    assert_eq!(scores, vec![160, 158, 157]);
    assert_eq!(backlog["targets"]["artworks"], 100);

    let report = read_json(&run_dir.join("gap_report.json"));
    let artist_match = report["matches"]
        .as_array()
        .expect("matches")
        .iter()
        .find(|m| m["reference"] == "artworks.artist_id -> artists.artist_id")
        .expect("artist match");
    assert_eq!(artist_match["matched_count"], 2);
    assert_eq!(artist_match["total_rows"], 3);

    let summary = std::fs::read_to_string(run_dir.join("gap_report.md")).expect("read md");
    assert!(summary.contains("# Gap Report: run_test"));
    assert!(summary.contains("agnsw-sydney-au"));
}

#[test]
fn missing_seed_table_aborts_without_a_run_folder() {
    let fixture = SeedFixture::standard();
    fixture.remove("exhibitions.csv");
    let output = fixture.scan("run_missing", &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("required input missing"), "stderr: {stderr}");
    assert!(stderr.contains("exhibitions.csv"), "stderr: {stderr}");
    assert!(!fixture.run_dir("run_missing").exists());
}

#[test]
fn missing_column_is_a_limitation_not_a_failure() {
    let fixture = SeedFixture::standard();
    fixture.write(
        "exhibitions.csv",
        "exhibition_id,title\ne-1,Triennial\n",
    );
    let output = fixture.scan("run_limited", &["--json"]);
    let summary = stdout_json(&output);
    assert!(summary["limitations"].as_u64().expect("limitations") > 0);

    let run_dir = fixture.run_dir("run_limited");
    let report = read_json(&run_dir.join("gap_report.json"));
    let gap = report["gaps"]
        .as_array()
        .expect("gaps")
        .iter()
        .find(|g| g["table"] == "exhibitions" && g["column"] == "museum_id")
        .expect("exhibitions.museum_id gap");
    assert_eq!(gap["present"], false);
    assert_eq!(gap["missing_count"], 1);
    assert_eq!(gap["missing_ratio"], 1.0);

    // No exhibition counts: every museum is kept, marked insufficient.
    let backlog = read_json(&run_dir.join("backlog.json"));
    let tasks = backlog["top_museums_to_enrich"].as_array().expect("tasks");
    assert_eq!(tasks.len(), 3);
    assert!(tasks
        .iter()
        .all(|task| task["status"] == "insufficient_data" && task["score"].is_null()));
}

#[test]
fn focus_country_and_targets_flow_from_flags() {
    let fixture = SeedFixture::standard();
    let output = fixture.scan(
        "run_focus",
        &[
            "--json",
            "--focus-country",
            "australia",
            "--target-artworks",
            "1",
            "--target-exhibitions",
            "1",
        ],
    );
    let summary = stdout_json(&output);
    let tasks = summary["top_museums_to_enrich"].as_array().expect("tasks");
    let ids: Vec<&str> = tasks
        .iter()
        .map(|task| task["museum_id"].as_str().expect("museum_id"))
        .collect();
    assert_eq!(ids, vec!["agnsw-sydney-au", "ngv-melbourne-au"]);
    assert_eq!(tasks[0]["score"], 3);
    assert_eq!(tasks[1]["score"], 0);
}

#[test]
fn config_file_is_layered_under_flags() {
    let fixture = SeedFixture::standard();
    let config_path = fixture.root.path().join("planner.json");
    std::fs::write(
        &config_path,
        r#"{"target_artworks_per_museum": 2, "backlog_top_n": 1}"#,
    )
    .expect("write config");
    let output = fixture.scan(
        "run_config",
        &["--config", config_path.to_str().expect("utf-8 path")],
    );
    assert!(output.status.success());

    let backlog = read_json(&fixture.run_dir("run_config").join("backlog.json"));
    assert_eq!(backlog["total_museums"], 3);
    let tasks = backlog["top_museums_to_enrich"].as_array().expect("tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["museum_id"], "agnsw-sydney-au");
    assert_eq!(tasks[0]["score"], 62);
}

#[test]
fn duplicate_museum_rows_collapse_to_one_task() {
    let fixture = SeedFixture::standard();
    fixture.write(
        "museums.csv",
        "museum_id,museum_name,city,country,website_url,collection_api\n\
         ngv-melbourne-au,National Gallery of Victoria,Melbourne,Australia,,\n\
         ngv-melbourne-au,NGV International,Melbourne,Australia,,\n",
    );
    let output = fixture.scan("run_dupes", &["--json"]);
    let summary = stdout_json(&output);
    let tasks = summary["top_museums_to_enrich"].as_array().expect("tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["museum_id"], "ngv-melbourne-au");
    assert_eq!(tasks[0]["museum_name"], "National Gallery of Victoria");

    let run_dir = fixture.run_dir("run_dupes");
    let backlog = read_json(&run_dir.join("backlog.json"));
    assert_eq!(backlog["total_museums"], 1);
    let report = read_json(&run_dir.join("gap_report.json"));
    let limitations = report["limitations"].as_array().expect("limitations");
    assert!(limitations
        .iter()
        .any(|l| l["kind"] == "duplicate_key" && l["table"] == "museums"));
}
