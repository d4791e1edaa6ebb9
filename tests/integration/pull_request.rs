//! Full pull request runs against mocked GitHub and rubygems APIs

use crate::support::{self, GEMFILE, GEMFILE_BASE64, GEMFILE_SHA, HEAD_SHA};
use bumper::config::Config;
use bumper::dependency::{Dependency, DependencyFile};
use bumper::host::GithubClient;
use bumper::metadata::{MetadataResolver, RepositoryId};
use bumper::pull_request::{PullRequestCreator, PullRequestOutcome};
use bumper::registry::RubygemsClient;
use bumper::BumperResult;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn creator(server: &MockServer) -> PullRequestCreator {
    let mut config = Config::default();
    config.github.api_url = server.uri();
    config.registry.rubygems_url = server.uri();

    let host = GithubClient::new(&config.github, &config.http, "token");
    let registry = RubygemsClient::new(&config.registry, &config.http);
    let resolver = MetadataResolver::new(
        Dependency::new("business", "1.5.0", "bundler"),
        Box::new(registry),
        "github.com",
    );

    PullRequestCreator::new(
        RepositoryId::parse("gocardless/bump").unwrap(),
        vec![DependencyFile::new("Gemfile", GEMFILE)],
        Box::new(host),
        resolver,
    )
}

async fn run(server: &MockServer) -> BumperResult<PullRequestOutcome> {
    let mut creator = creator(server);
    tokio::task::spawn_blocking(move || creator.create())
        .await
        .unwrap()
}

#[tokio::test]
async fn creates_branch_commit_and_pull_request() {
    let server = MockServer::start().await;
    support::mount_reads(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/gocardless/bump/git/refs"))
        .and(body_json(json!({
            "ref": "refs/heads/bump_business_to_1.5.0",
            "sha": HEAD_SHA
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ref": "refs/heads/bump_business_to_1.5.0",
            "object": { "sha": HEAD_SHA }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/gocardless/bump/contents/Gemfile"))
        .and(body_json(json!({
            "branch": "bump_business_to_1.5.0",
            "sha": GEMFILE_SHA,
            "content": GEMFILE_BASE64,
            "message": "Updating Gemfile"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "content": {}, "commit": {} })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/gocardless/bump/pulls"))
        .and(body_json(json!({
            "base": "master",
            "head": "bump_business_to_1.5.0",
            "title": "Bump business to 1.5.0",
            "body": support::expected_body()
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 1347,
            "html_url": "https://github.com/gocardless/bump/pull/1347",
            "state": "open"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(&server).await.unwrap();

    match outcome {
        PullRequestOutcome::Created(pr) => {
            assert_eq!(pr.number, 1347);
            assert_eq!(pr.html_url, "https://github.com/gocardless/bump/pull/1347");
        }
        other => panic!("expected a created pull request, got {other:?}"),
    }
}

#[tokio::test]
async fn existing_branch_is_skipped() {
    let server = MockServer::start().await;
    support::mount_reads(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/gocardless/bump/git/refs"))
        .respond_with(support::create_ref_conflict())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/gocardless/bump/contents/Gemfile"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/gocardless/bump/pulls"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gems/business.json"))
        .respond_with(ResponseTemplate::new(200))
        .with_priority(1)
        .expect(0)
        .named("rubygems is not consulted when skipping")
        .mount(&server)
        .await;

    let outcome = run(&server).await.unwrap();

    assert_eq!(
        outcome,
        PullRequestOutcome::Skipped {
            branch: "bump_business_to_1.5.0".to_string()
        }
    );
}

#[tokio::test]
async fn gem_missing_from_rubygems_gets_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/gems/business.json"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("This rubygem could not be found."),
        )
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    support::mount_reads(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/gocardless/bump/git/refs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/gocardless/bump/contents/Gemfile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/gocardless/bump/pulls"))
        .and(body_json(json!({
            "base": "master",
            "head": "bump_business_to_1.5.0",
            "title": "Bump business to 1.5.0",
            "body": "Bumps business to 1.5.0"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 2,
            "html_url": "https://github.com/gocardless/bump/pull/2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(&server).await.unwrap();

    assert!(matches!(outcome, PullRequestOutcome::Created(ref pr) if pr.number == 2));
}

#[tokio::test]
async fn non_utf8_base_file_is_still_replaced() {
    let server = MockServer::start().await;
    // Latin-1 comment in the committed Gemfile
    Mock::given(method("GET"))
        .and(path("/repos/gocardless/bump/contents/Gemfile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Gemfile",
            "sha": GEMFILE_SHA,
            "encoding": "base64",
            "content": "IyBjYWbpCmdlbSAiYnVzaW5lc3MiCg==\n"
        })))
        .with_priority(1)
        .mount(&server)
        .await;
    support::mount_reads(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/gocardless/bump/git/refs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/gocardless/bump/contents/Gemfile"))
        .and(body_json(json!({
            "branch": "bump_business_to_1.5.0",
            "sha": GEMFILE_SHA,
            "content": GEMFILE_BASE64,
            "message": "Updating Gemfile"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/gocardless/bump/pulls"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 3,
            "html_url": "https://github.com/gocardless/bump/pull/3"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = run(&server).await.unwrap();

    assert!(matches!(outcome, PullRequestOutcome::Created(ref pr) if pr.number == 3));
}

#[tokio::test]
async fn failed_commit_leaves_branch_without_pull_request() {
    let server = MockServer::start().await;
    support::mount_reads(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/gocardless/bump/git/refs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/gocardless/bump/contents/Gemfile"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Gemfile does not match dbce0c9"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/gocardless/bump/pulls"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let result = run(&server).await;

    assert!(matches!(
        result,
        Err(bumper::BumperError::UnexpectedStatus { status: 409, .. })
    ));
}
