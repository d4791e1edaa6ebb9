//! Mock GitHub and rubygems endpoints for the `gocardless/bump` scenario

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const HEAD_SHA: &str = "aa218f56b14c9653891f9e74264a383fa43fefbd";
pub const GEMFILE_SHA: &str = "dbce0c9e2e7efd19139c2c0aeb0110e837812c2f";
pub const GEMFILE: &str = "source \"https://rubygems.org\"\n\ngem \"business\", \"~> 1.4.0\"\n";
pub const GEMFILE_BASE64: &str =
    "c291cmNlICJodHRwczovL3J1YnlnZW1zLm9yZyIKCmdlbSAiYnVzaW5lc3MiLCAifj4gMS40LjAiCg==";

/// Mount the read-only endpoints: target repo, its ref and Gemfile, the
/// business gem on rubygems, and the business repo's root listing.
pub async fn mount_reads(server: &MockServer) {
    let api = server.uri();

    Mock::given(method("GET"))
        .and(path("/repos/gocardless/bump"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": "gocardless/bump",
            "default_branch": "master"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/gocardless/bump/git/refs/heads/master"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": "refs/heads/master",
            "object": { "sha": HEAD_SHA, "type": "commit" }
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/gocardless/bump/contents/Gemfile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Gemfile",
            "path": "Gemfile",
            "sha": GEMFILE_SHA,
            "encoding": "base64",
            "content": "c291cmNlICJodHRwczovL3J1YnlnZW1zLm9yZyIKCmdlbSAiYnVza\nW5lc3MiLCAifj4gMS4zLjAiCg==\n"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/gems/business.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "business",
            "version": "1.5.0",
            "homepage_uri": "https://github.com/gocardless/business",
            "source_code_uri": null,
            "project_uri": "https://rubygems.org/gems/business"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/gocardless/business"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "full_name": "gocardless/business",
            "default_branch": "master"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/gocardless/business/contents/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": ".gitignore",
                "type": "file",
                "url": format!("{api}/repos/gocardless/business/contents/.gitignore?ref=master")
            },
            {
                "name": "CHANGELOG.md",
                "type": "file",
                "url": "https://api.github.com/repos/gocardless/business/contents/CHANGELOG.md?ref=master",
                "html_url": "https://github.com/gocardless/business/blob/master/CHANGELOG.md"
            },
            {
                "name": "lib",
                "type": "dir",
                "url": format!("{api}/repos/gocardless/business/contents/lib?ref=master")
            }
        ])))
        .mount(server)
        .await;
}

pub fn create_ref_conflict() -> ResponseTemplate {
    ResponseTemplate::new(422).set_body_json(json!({
        "message": "Reference already exists",
        "documentation_url": "https://developer.github.com/v3/git/refs/#create-a-reference"
    }))
}

pub fn expected_body() -> String {
    "Bumps [business](https://github.com/gocardless/business) to 1.5.0\
     \n- [Changelog](https://api.github.com/repos/gocardless/business/contents/CHANGELOG.md?ref=master)\
     \n- [Commits](https://github.com/gocardless/business/commits)"
        .to_string()
}
