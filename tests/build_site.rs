//! End-to-end builds of the sample store in `fixtures/data`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use wanderpress::pipeline::{self, BuildOptions};
use wanderpress::write::Route;

/// Copy `fixtures/data/` into a fresh temp directory.
fn fixture_data() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/data");
    for entry in fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

fn build_into(data: &Path, out: &Path, prune: bool) -> pipeline::BuildReport {
    pipeline::build(&BuildOptions {
        data_dir: data.to_path_buf(),
        output_dir: out.to_path_buf(),
        prune,
    })
    .unwrap()
}

fn read(out: &Path, file: &str) -> String {
    fs::read_to_string(out.join(file)).unwrap_or_else(|e| panic!("reading {file}: {e}"))
}

/// Every file under `root`, relative and sorted, with its contents.
fn snapshot_tree(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files: Vec<(PathBuf, Vec<u8>)> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}

#[test]
fn writes_the_complete_route_table() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);

    for file in [
        "index.html",
        "404.html",
        "about/index.html",
        "blog/index.html",
        "blog/kyoto-in-autumn/index.html",
        "blog/lisbon-by-tram/index.html",
        "blog/street-food-night-markets/index.html",
    ] {
        assert!(out.path().join(file).is_file(), "{file} was not written");
    }
    assert!(!out.path().join("blog/oaxaca-notes").exists());
    assert_eq!(snapshot_tree(out.path()).len(), 7);
}

#[test]
fn drafts_never_appear_anywhere() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);

    for (file, bytes) in snapshot_tree(out.path()) {
        let html = String::from_utf8(bytes).unwrap();
        assert!(
            !html.contains("Oaxaca") && !html.contains("oaxaca-notes"),
            "draft leaked into {}",
            file.display()
        );
    }
}

#[test]
fn rebuilding_is_byte_identical() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);
    let first = snapshot_tree(out.path());
    build_into(data.path(), out.path(), false);
    let second = snapshot_tree(out.path());
    assert_eq!(first, second);
}

#[test]
fn home_features_newest_post() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);
    let home = read(out.path(), "index.html");

    assert!(home.contains("<h1>Kyoto in Autumn</h1>"));
    assert!(home.contains("url(&quot;/uploads/kyoto.jpg&quot;)"));
    assert!(home.contains("Recent Stories"));
    assert!(home.contains(r#"href="/blog/lisbon-by-tram/""#));
    // Lisbon has no image of its own
    assert!(home.contains("url(&quot;/uploads/default-travel.jpg&quot;)"));
    assert!(home.contains("© 2024 Wanderlust Chronicles."));
}

#[test]
fn titles_are_escaped_on_every_page() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);

    for file in [
        "index.html",
        "blog/index.html",
        "blog/street-food-night-markets/index.html",
        "blog/lisbon-by-tram/index.html",
    ] {
        let html = read(out.path(), file);
        assert!(!html.contains("<script>"), "raw <script> in {file}");
        assert!(
            html.contains("Street Food &amp; Night Markets &lt;script&gt;"),
            "escaped title missing from {file}"
        );
    }
}

#[test]
fn post_content_is_inserted_verbatim() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);
    let kyoto = read(out.path(), "blog/kyoto-in-autumn/index.html");

    assert!(kyoto.contains("<p>The maples along the <em>Philosopher's Path</em> were on fire.</p>"));
    assert!(kyoto.contains(r#"src="https://www.youtube.com/embed/dQw4w9WgXcQ""#));
    assert!(kyoto.contains("March 3, 2024"));
    assert!(kyoto.contains("Updated Mar 5, 2024"));
    assert!(kyoto.contains(r#"href="/blog/?category=c-asia""#));
    assert!(kyoto.contains(r##"<a class="tag" href="/blog/?q=japan">#japan</a>"##));
}

#[test]
fn prev_next_follow_the_timeline() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);

    let kyoto = read(out.path(), "blog/kyoto-in-autumn/index.html");
    assert!(kyoto.contains(r#"<a class="nav-prev" href="/blog/lisbon-by-tram/">"#));
    assert!(!kyoto.contains("nav-next"));

    // Lisbon and the night markets share a timestamp; collection order decides.
    let lisbon = read(out.path(), "blog/lisbon-by-tram/index.html");
    assert!(lisbon.contains(r#"<a class="nav-prev" href="/blog/street-food-night-markets/">"#));
    assert!(lisbon.contains(r#"<a class="nav-next" href="/blog/kyoto-in-autumn/">"#));

    let markets = read(out.path(), "blog/street-food-night-markets/index.html");
    assert!(!markets.contains("nav-prev"));
    assert!(markets.contains(r#"<a class="nav-next" href="/blog/lisbon-by-tram/">"#));
}

#[test]
fn fallbacks_for_missing_data() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);

    let lisbon = read(out.path(), "blog/lisbon-by-tram/index.html");
    assert!(!lisbon.contains("post-hero"));
    // Updated timestamp equals creation: no marker
    assert!(!lisbon.contains("Updated"));

    let markets = read(out.path(), "blog/street-food-night-markets/index.html");
    assert!(!markets.contains("post-category-link"));
    assert!(!markets.contains("<iframe"));
    assert_eq!(markets.matches(r#"class="tag""#).count(), 2);
}

#[test]
fn listing_embeds_published_dataset() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);
    let listing = read(out.path(), "blog/index.html");

    assert!(listing.contains("3 adventures and counting"));
    assert_eq!(listing.matches(r#"class="post-card""#).count(), 3);

    let start = listing
        .find(r#"<script id="blog-data" type="application/json">"#)
        .unwrap();
    let body = &listing[start..];
    let json_start = body.find('>').unwrap() + 1;
    let json_end = body.find("</script>").unwrap();
    let dataset: serde_json::Value = serde_json::from_str(&body[json_start..json_end]).unwrap();

    let slugs: Vec<&str> = dataset["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(
        slugs,
        vec!["kyoto-in-autumn", "lisbon-by-tram", "street-food-night-markets"]
    );
    assert_eq!(
        dataset["posts"][2]["title"],
        "Street Food & Night Markets <script>"
    );
    assert_eq!(dataset["categories"].as_array().unwrap().len(), 3);
}

#[test]
fn about_page_renders_markdown() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);
    let about = read(out.path(), "about/index.html");
    assert!(about.contains("<strong>wanderer</strong>"));

    fs::remove_file(data.path().join("about.md")).unwrap();
    build_into(data.path(), out.path(), false);
    let about = read(out.path(), "about/index.html");
    assert!(about.contains("Why I travel"));
}

#[test]
fn unpublishing_leaves_stale_route_until_pruned() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    build_into(data.path(), out.path(), false);

    let posts = read(data.path(), "posts.json").replacen(
        r#""status": "published",
    "categoryId": "c-europe""#,
        r#""status": "draft",
    "categoryId": "c-europe""#,
        1,
    );
    fs::write(data.path().join("posts.json"), posts).unwrap();

    let report = build_into(data.path(), out.path(), false);
    assert_eq!(report.stale, vec![Route::Post("lisbon-by-tram".into())]);
    assert!(out.path().join("blog/lisbon-by-tram/index.html").exists());
    let kyoto = read(out.path(), "blog/kyoto-in-autumn/index.html");
    assert!(!kyoto.contains("/blog/lisbon-by-tram/"));

    let report = build_into(data.path(), out.path(), true);
    assert_eq!(report.pruned, vec![Route::Post("lisbon-by-tram".into())]);
    assert!(report.stale.is_empty());
    assert!(!out.path().join("blog/lisbon-by-tram").exists());
    assert!(out.path().join("blog/index.html").exists());
}

#[test]
fn cli_build_and_check() {
    let data = fixture_data();
    let out = TempDir::new().unwrap();
    let bin = env!("CARGO_BIN_EXE_wanderpress");

    let status = Command::new(bin)
        .arg("--data")
        .arg(data.path())
        .arg("--output")
        .arg(out.path())
        .arg("build")
        .output()
        .unwrap();
    assert!(status.status.success());
    let stdout = String::from_utf8_lossy(&status.stdout);
    assert!(stdout.contains("001 Kyoto in Autumn \u{2192} blog/kyoto-in-autumn/index.html"));
    assert!(stdout.contains("Built 3 posts, 7 pages"));
    assert!(out.path().join("index.html").is_file());

    let check = Command::new(bin)
        .arg("check")
        .arg("--data")
        .arg(data.path())
        .output()
        .unwrap();
    assert!(check.status.success());
    let stdout = String::from_utf8_lossy(&check.stdout);
    assert!(stdout.contains("street-food-night-markets \u{2192} c-deleted"));
}

#[test]
fn cli_fails_on_malformed_data() {
    let data = TempDir::new().unwrap();
    fs::write(data.path().join("categories.json"), "{not json").unwrap();
    let out = TempDir::new().unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_wanderpress"))
        .arg("--data")
        .arg(data.path())
        .arg("--output")
        .arg(out.path())
        .arg("build")
        .output()
        .unwrap();
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("categories.json"));
    assert!(!out.path().join("index.html").exists());
}
