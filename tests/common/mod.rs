//! Shared test infrastructure for integration tests.
#![allow(dead_code)]

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A seed directory plus a runs directory inside one temp root.
pub struct SeedFixture {
    pub root: TempDir,
}

impl SeedFixture {
    /// Seed with three museums, a handful of artworks, and one exhibition.
    pub fn standard() -> Self {
        let fixture = Self::empty();
        fixture.write(
            "museums.csv",
            "museum_id,museum_name,city,country,website_url,collection_api\n\
             art-institute-of-chicago-us,Art Institute of Chicago,Chicago,United States,https://www.artic.edu,https://api.artic.edu/api/v1\n\
             ngv-melbourne-au,National Gallery of Victoria,Melbourne,Australia,,\n\
             agnsw-sydney-au,Art Gallery of New South Wales,Sydney,Australia,,\n",
        );
        fixture.write(
            "artworks.csv",
            "artwork_id,title,artist_id,art_type,year,image_url,description,museum_id,medium,dimensions,museum_page_url,on_view,highlight\n\
             a-1,Nighthawks,hopper,painting,1942,,,art-institute-of-chicago-us,oil,,,TRUE,FALSE\n\
             a-2,American Gothic,wood,painting,1930,,,art-institute-of-chicago-us,oil,,,TRUE,TRUE\n\
             a-3,Shearing the Rams,roberts,painting,1890,,,ngv-melbourne-au,,,,,\n",
        );
        fixture.write(
            "artists.csv",
            "artist_id,name,nationality,birth_year,death_year\n\
             hopper,Edward Hopper,American,1882,1967\n\
             wood,Grant Wood,American,1891,1942\n",
        );
        fixture.write(
            "exhibitions.csv",
            "exhibition_id,museum_id,title,start_date,end_date,exhibition_url\n\
             e-1,ngv-melbourne-au,Triennial,2023-12-03,2024-04-07,\n",
        );
        fixture
    }

    pub fn empty() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("seed")).expect("create seed dir");
        Self { root }
    }

    pub fn seed_dir(&self) -> PathBuf {
        self.root.path().join("seed")
    }

    pub fn runs_dir(&self) -> PathBuf {
        self.root.path().join("runs")
    }

    pub fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.seed_dir().join(name), contents.as_bytes()).expect("write seed file");
    }

    pub fn remove(&self, name: &str) {
        std::fs::remove_file(self.seed_dir().join(name)).expect("remove seed file");
    }

    /// Run `atlas scan` against this fixture with extra args.
    pub fn scan(&self, run_id: &str, extra: &[&str]) -> Output {
        Command::new(atlas_bin())
            .arg("scan")
            .arg("--seed-dir")
            .arg(self.seed_dir())
            .arg("--runs-dir")
            .arg(self.runs_dir())
            .arg("--run-id")
            .arg(run_id)
            .args(extra)
            .output()
            .expect("run atlas scan")
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.runs_dir().join(run_id)
    }
}

pub fn atlas_bin() -> &'static str {
    env!("CARGO_BIN_EXE_atlas")
}

pub fn read_json(path: &Path) -> Value {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
    serde_json::from_str(&content).expect("parse json")
}

pub fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("parse stdout json")
}
