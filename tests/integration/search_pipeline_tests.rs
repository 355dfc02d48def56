//! End-to-end tests of the two-stage search pipeline against a mock server
//!
//! The mock server stands in for the NCBI E-utilities endpoints; fixtures
//! mirror the XML documents the real ESearch and EFetch services return,
//! DOCTYPE declarations included.

use tracing::info;
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scholared::{ClientConfig, PubMedClient, SearchQuery};

const ESEARCH_TWO_RESULTS: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<!DOCTYPE eSearchResult PUBLIC "-//NLM//DTD esearch 20060628//EN" "https://eutils.ncbi.nlm.nih.gov/eutils/dtd/20060628/esearch.dtd">
<eSearchResult>
    <Count>2</Count>
    <RetMax>2</RetMax>
    <RetStart>0</RetStart>
    <QueryKey>1</QueryKey>
    <WebEnv>MCID_675f2a81c3d4e5f6a7b8c9d0</WebEnv>
    <IdList>
        <Id>31452104</Id>
        <Id>29323588</Id>
    </IdList>
    <TranslationStack>
        <TermSet>
            <Term>test[All Fields]</Term>
            <Field>All Fields</Field>
            <Count>994</Count>
            <Explode>N</Explode>
        </TermSet>
        <OP>GROUP</OP>
    </TranslationStack>
    <QueryTranslation>test[All Fields]</QueryTranslation>
</eSearchResult>"#;

const ESEARCH_NO_RESULTS: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<!DOCTYPE eSearchResult PUBLIC "-//NLM//DTD esearch 20060628//EN" "https://eutils.ncbi.nlm.nih.gov/eutils/dtd/20060628/esearch.dtd">
<eSearchResult>
    <Count>0</Count>
    <RetMax>0</RetMax>
    <RetStart>0</RetStart>
    <IdList>
    </IdList>
</eSearchResult>"#;

const EFETCH_TWO_ARTICLES: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2023//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_230101.dtd">
<PubmedArticleSet>
<PubmedArticle>
    <MedlineCitation>
        <PMID Version="1">31452104</PMID>
        <Article>
            <Journal>
                <JournalIssue>
                    <PubDate>
                        <Year>2019</Year>
                        <Month>Aug</Month>
                    </PubDate>
                </JournalIssue>
                <Title>Journal of Sleep Research</Title>
            </Journal>
            <ArticleTitle>Circadian rhythms in later life.</ArticleTitle>
            <Abstract>
                <AbstractText>Sleep timing shifts earlier with age.</AbstractText>
            </Abstract>
            <AuthorList>
                <Author>
                    <LastName>Smith</LastName>
                    <ForeName>Jane Anne</ForeName>
                    <Initials>JA</Initials>
                </Author>
            </AuthorList>
        </Article>
    </MedlineCitation>
</PubmedArticle>
<PubmedArticle>
    <MedlineCitation>
        <PMID Version="1">29323588</PMID>
        <Article>
            <Journal>
                <JournalIssue>
                    <PubDate>
                        <Year>2018</Year>
                    </PubDate>
                </JournalIssue>
                <Title>Chronobiology International</Title>
            </Journal>
            <ArticleTitle>Light exposure and the human clock.</ArticleTitle>
            <Abstract>
                <AbstractText>Evening light delays melatonin onset.</AbstractText>
            </Abstract>
            <AuthorList>
                <Author>
                    <LastName>Brown</LastName>
                    <ForeName>Robert</ForeName>
                    <Initials>R</Initials>
                </Author>
            </AuthorList>
        </Article>
    </MedlineCitation>
</PubmedArticle>
</PubmedArticleSet>"#;

const EFETCH_SECOND_RECORD_UNTITLED: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
<PubmedArticle>
    <Article>
        <PubDate><Year>2019</Year></PubDate>
        <ArticleTitle>The only well-formed record.</ArticleTitle>
    </Article>
</PubmedArticle>
<PubmedArticle>
    <Article>
        <PubDate><Year>2018</Year></PubDate>
    </Article>
</PubmedArticle>
</PubmedArticleSet>"#;

fn client_for(server: &MockServer) -> PubMedClient {
    PubMedClient::with_config(ClientConfig::new().with_base_url(server.uri()))
}

/// Full round trip: search stage yields two ids, fetch stage yields both
/// articles in document order
#[tokio::test]
#[traced_test]
async fn test_search_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", "test"))
        .and(query_param("usehistory", "y"))
        .and(query_param("retmax", "20"))
        .and(query_param("retstart", "0"))
        .and(query_param("tool", "scholared"))
        .and(query_param("email", "email@yourdomain.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH_TWO_RESULTS))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("id", "31452104,29323588"))
        .and(query_param("retmode", "xml"))
        .and(query_param("tool", "scholared"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_TWO_ARTICLES))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let result = client.search("test").await.expect("Search should succeed");

    assert_eq!(result.total_match_count, "2");
    assert_eq!(result.identifiers, vec!["31452104", "29323588"]);
    assert_eq!(result.articles.len(), 2);
    assert!(result.articles.len() <= result.identifiers.len());

    assert_eq!(result.articles[0].author, "Smith, JA");
    assert_eq!(result.articles[0].title, "Circadian rhythms in later life.");
    assert_eq!(result.articles[0].year, "2019");
    assert_eq!(
        result.articles[0].abstract_text,
        "Sleep timing shifts earlier with age."
    );

    assert_eq!(result.articles[1].author, "Brown, R");
    assert_eq!(result.articles[1].title, "Light exposure and the human clock.");
    assert_eq!(result.articles[1].year, "2018");

    info!(
        total = %result.total_match_count,
        articles = result.articles.len(),
        "Round trip test passed"
    );
}

/// A search with zero matches must not issue a fetch-stage request
#[tokio::test]
#[traced_test]
async fn test_empty_result_skips_fetch_stage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH_NO_RESULTS))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_TWO_ARTICLES))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let result = client
        .search("zxqwvjkplmhftyrb12345678unique")
        .await
        .expect("Search should succeed");

    assert_eq!(result.total_match_count, "0");
    assert!(result.identifiers.is_empty());
    assert!(result.articles.is_empty());

    mock_server.verify().await;
    info!("Empty result short-circuit test passed");
}

/// Paging parameters from the query builder reach the search stage URL
#[tokio::test]
#[traced_test]
async fn test_paging_parameters_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "5"))
        .and(query_param("retstart", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH_NO_RESULTS))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let result = SearchQuery::new("asthma")
        .with_page_size(5)
        .with_page_offset(10)
        .run(&mut client)
        .await
        .expect("Search should succeed");

    assert!(result.articles.is_empty());
    info!("Paging parameter test passed");
}

/// An empty search term returns an empty result without touching the network
#[tokio::test]
#[traced_test]
async fn test_empty_term_issues_no_requests() {
    let mock_server = MockServer::start().await;

    let mut client = client_for(&mock_server);
    let result = client.search("").await.expect("Search should succeed");

    assert_eq!(result.total_match_count, "");
    assert!(result.identifiers.is_empty());
    assert!(result.articles.is_empty());

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording should be enabled");
    assert!(requests.is_empty(), "No request should have been issued");
}

/// A fetch-stage record without its required title is dropped, so fewer
/// articles than identifiers come back
#[tokio::test]
#[traced_test]
async fn test_articles_never_exceed_identifiers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ESEARCH_TWO_RESULTS))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EFETCH_SECOND_RECORD_UNTITLED))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let result = client.search("test").await.expect("Search should succeed");

    assert_eq!(result.identifiers.len(), 2);
    assert_eq!(result.articles.len(), 1);
    assert!(result.articles.len() <= result.identifiers.len());
    assert_eq!(result.articles[0].title, "The only well-formed record.");

    info!("Dropped-record invariant test passed");
}
