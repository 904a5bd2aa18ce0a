//! Shared fixtures for the integration tests: a small abstract dump and the
//! two catalog tables, written into a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use filmlink::{FilmlinkConfig, InputPaths};
use tempfile::TempDir;

pub const WIKI: &str = r#"<feed>
<doc>
<title>Wikipedia: Toy Story (film)</title>
<url>https://en.wikipedia.org/wiki/Toy_Story</url>
<abstract>Toy Story is a 1995 American computer-animated film produced by Pixar Animation Studios, starring Tom Hanks.</abstract>
<links>
<sublink linktype="nav"><anchor>Plot</anchor><link>https://en.wikipedia.org/wiki/Toy_Story#Plot</link></sublink>
</links>
</doc>
<doc>
<title>Wikipedia: Heat (1995 film)</title>
<url>https://en.wikipedia.org/wiki/Heat_(1995_film)</url>
<abstract>Heat is a 1995 American crime film directed by Michael Mann, starring Al Pacino and Robert De Niro.</abstract>
<links>
<sublink linktype="nav"><anchor>Plot</anchor><link>https://en.wikipedia.org/wiki/Heat_(1995_film)#Plot</link></sublink>
<sublink linktype="nav"><anchor>Cast</anchor><link>https://en.wikipedia.org/wiki/Heat_(1995_film)#Cast</link></sublink>
<sublink linktype="nav"><anchor>Production</anchor><link>https://en.wikipedia.org/wiki/Heat_(1995_film)#Production</link></sublink>
<sublink linktype="nav"><anchor>Reception</anchor><link>https://en.wikipedia.org/wiki/Heat_(1995_film)#Reception</link></sublink>
</links>
</doc>
<doc>
<title>Wikipedia: Anarchism</title>
<url>https://en.wikipedia.org/wiki/Anarchism</url>
<abstract>Anarchism is a political philosophy.</abstract>
<links>
<sublink linktype="nav"><anchor>History</anchor><link>https://en.wikipedia.org/wiki/Anarchism#History</link></sublink>
</links>
</doc>
<doc>
<title>Wikipedia: Toy Story (film)</title>
<url>https://en.wikipedia.org/wiki/Toy_Story_(stub)</url>
<abstract>A stub about a toy.</abstract>
<links></links>
</doc>
<doc>
<title>Wikipedia: Ronin (film)</title>
<url>https://en.wikipedia.org/wiki/Ronin_(film)</url>
<abstract>Ronin is a 1998 action thriller.</abstract>
<links></links>
</doc>
</feed>
"#;

pub const METADATA: &str = "\
adult,id,original_title,production_companies,release_date,title
False,862,Toy Story,\"[{'name': 'Pixar Animation Studios', 'id': 3}]\",1995-10-30,Toy Story
False,949,Heat,\"[{'name': 'Warner Bros.', 'id': 6194}]\",1995-12-15,Heat
False,8844,Jumanji,\"[{'name': 'TriStar Pictures', 'id': 559}]\",1995-12-15,Jumanji
";

pub const CREDITS: &str = "\
cast,crew,id
\"[{'cast_id': 14, 'character': 'Woody (voice)', 'name': 'Tom Hanks'}, {'cast_id': 15, 'character': 'Buzz Lightyear (voice)', 'name': 'Tim Allen'}]\",\"[{'job': 'Director', 'name': 'John Lasseter'}]\",862
\"[{'cast_id': 1, 'character': 'McCauley', 'name': 'Robert De Niro'}, {'cast_id': 2, 'character': 'Hanna', 'name': 'Al Pacino'}]\",\"[{'job': 'Director', 'name': 'Michael Mann'}]\",949
";

/// `(0.78125 + 1/3) / 2`: title source and credits source for Toy Story.
pub const TOY_STORY_SCORE: f64 = (0.78125 + 1.0 / 3.0) / 2.0;
/// `(0.375 + 1.0) / 2`: title source and credits source for Heat.
pub const HEAT_SCORE: f64 = (0.375 + 1.0) / 2.0;

pub struct Fixture {
    pub dir: TempDir,
    pub inputs: InputPaths,
    pub config: FilmlinkConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_contents(WIKI, METADATA, CREDITS)
    }

    pub fn with_contents(wiki: &str, metadata: &str, credits: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let inputs = InputPaths {
            wiki: write(dir.path(), "abstracts.xml", wiki),
            catalog: write(dir.path(), "movies_metadata.csv", metadata),
            credits: write(dir.path(), "credits.csv", credits),
        };
        let mut config = FilmlinkConfig::default();
        config.output.path = dir.path().join("matches.csv");
        Self {
            dir,
            inputs,
            config,
        }
    }

    pub fn output(&self) -> String {
        fs::read_to_string(&self.config.output.path).expect("output written")
    }
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

/// A feed of `count` distinct movie documents titled `film 0000 (film)` and up.
pub fn generated_feed(count: usize) -> String {
    let mut feed = String::from("<feed>\n");
    for i in 0..count {
        feed.push_str(&format!(
            "<doc><title>Wikipedia: Film {i:04} (film)</title>\
             <url>https://en.wikipedia.org/wiki/Film_{i:04}</url>\
             <abstract>Film {i:04} is a {year} drama.</abstract><links></links></doc>\n",
            year = 1900 + i % 100,
        ));
    }
    feed.push_str("</feed>\n");
    feed
}

/// Catalog rows matching [`generated_feed`].
pub fn generated_metadata(count: usize) -> String {
    let mut table = String::from("id,original_title,production_companies,release_date,title\n");
    for i in 0..count {
        table.push_str(&format!(
            "{i},Film {i:04},[],{year}-01-01,Film {i:04}\n",
            year = 1900 + i % 100,
        ));
    }
    table
}
