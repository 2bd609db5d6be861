//! Legal retrieval against scripted search backends

mod common;

use common::{doc, CountingLegal, LegalScript};
use std::time::Duration;
use vca_core::ports::SortOrder;
use vca_core::StageStatus;
use vca_retrieval::legal::RETRIEVAL_FAILED;
use vca_retrieval::LegalInfoRetriever;

fn terms(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[tokio::test]
async fn test_empty_terms_return_nothing_without_backend_call() {
    let backend = CountingLegal::new(LegalScript::Documents(vec![doc("t", "s")]));
    let retriever = LegalInfoRetriever::live(backend.clone());

    let outcome = retriever.fetch(&[]).await;

    assert!(outcome.value().is_empty());
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_unconfigured_returns_two_notices() {
    let outcome = LegalInfoRetriever::unconfigured().fetch(&terms(&["gst"])).await;

    assert_eq!(outcome.status(), StageStatus::Unconfigured);
    let snippets = outcome.into_value();
    assert_eq!(snippets.len(), 2);
    assert!(snippets.iter().all(|s| s.contains("API key")));
    assert!(snippets[0].contains("'gst'"));
}

#[tokio::test]
async fn test_live_formats_ranked_documents() {
    let backend = CountingLegal::new(LegalScript::Documents(vec![
        doc("Income Tax Act, 1961", "Section 80C"),
        doc("CBDT Circular 2023", "Revised slabs"),
    ]));
    let retriever = LegalInfoRetriever::live(backend.clone());

    let outcome = retriever.fetch(&terms(&["income", "tax", "deductions"])).await;

    assert_eq!(outcome.status(), StageStatus::Live);
    assert_eq!(
        outcome.value(),
        &vec![
            "Income Tax Act, 1961: Section 80C".to_string(),
            "CBDT Circular 2023: Revised slabs".to_string(),
        ]
    );

    let request = backend.last_request().unwrap();
    assert_eq!(request.query, "income tax deductions");
    assert_eq!(request.limit, 5);
    assert_eq!(request.sort, SortOrder::Relevance);
}

#[tokio::test]
async fn test_live_caps_results_at_five() {
    let docs = (0..9).map(|i| doc(&format!("Case {}", i), "held")).collect();
    let retriever = LegalInfoRetriever::live(CountingLegal::new(LegalScript::Documents(docs)));

    let outcome = retriever.fetch(&terms(&["gst"])).await;

    assert_eq!(outcome.value().len(), 5);
    assert_eq!(outcome.value()[0], "Case 0: held");
}

#[tokio::test]
async fn test_backend_failure_becomes_single_error_snippet() {
    let retriever = LegalInfoRetriever::live(CountingLegal::new(LegalScript::Fail));

    let outcome = retriever.fetch(&terms(&["gst"])).await;

    assert_eq!(outcome.status(), StageStatus::Recovered);
    assert_eq!(outcome.value(), &vec![RETRIEVAL_FAILED.to_string()]);
    assert!(outcome.cause().unwrap().contains("503"));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_backend_times_out() {
    let retriever =
        LegalInfoRetriever::live(CountingLegal::new(LegalScript::Hang)).with_timeout(Duration::from_secs(10));

    let outcome = retriever.fetch(&terms(&["gst"])).await;

    assert_eq!(outcome.status(), StageStatus::Recovered);
    assert_eq!(outcome.value(), &vec![RETRIEVAL_FAILED.to_string()]);
}

#[tokio::test]
async fn test_demo_routing_is_split_insensitive() {
    let retriever = LegalInfoRetriever::demo();

    let joined = retriever.fetch(&terms(&["income tax"])).await.into_value();
    let split = retriever.fetch(&terms(&["income", "tax"])).await.into_value();

    assert_eq!(joined, split);
    assert_eq!(joined.len(), 3);
    assert!(joined[1].contains("Income Tax Act, 1961"));
}

#[tokio::test]
async fn test_demo_gst_branch() {
    let snippets = LegalInfoRetriever::demo().fetch(&terms(&["GST", "textiles"])).await.into_value();

    assert!(snippets[0].contains("'GST textiles'"));
    assert!(snippets.iter().skip(1).all(|s| s.contains("GST")));
    assert!(snippets[1].contains("Central Goods and Services Tax Act, 2017"));
}
