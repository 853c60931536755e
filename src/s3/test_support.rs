//! Canned S3 responses replayed through the SDK's test HTTP client.

use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_smithy_runtime::client::http::test_util::{ReplayEvent, StaticReplayClient};
use aws_smithy_types::body::SdkBody;
use aws_types::region::Region;

use super::Client;

/// Client answering each request with the next of `responses`
pub(crate) fn replay(responses: Vec<http::Response<SdkBody>>) -> (Client, StaticReplayClient) {
    let events = responses.into_iter()
        .map(|response| {
            let request = http::Request::builder()
                .uri("https://s3.eu-west-1.amazonaws.com/")
                .body(SdkBody::empty())
                .unwrap();
            ReplayEvent::new(request, response)
        })
        .collect();
    let http_client = StaticReplayClient::new(events);
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("eu-west-1"))
        .credentials_provider(Credentials::new("ABC", "XYZ", None, None, "test"))
        .retry_config(RetryConfig::disabled())
        .force_path_style(true)
        .http_client(http_client.clone())
        .build();
    (Client::from_conf(config), http_client)
}

pub(crate) fn response(status: u16, body: impl Into<SdkBody>) -> http::Response<SdkBody> {
    http::Response::builder()
        .status(status)
        .body(body.into())
        .unwrap()
}

pub(crate) fn xml_error(status: u16, code: &str, message: &str) -> http::Response<SdkBody> {
    response(status, format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Error><Code>{code}</Code><Message>{message}</Message><RequestId>req</RequestId><HostId>host</HostId></Error>"#
    ))
}

pub(crate) fn list_buckets_body(names: &[&str]) -> String {
    let buckets: String = names.iter()
        .map(|name| format!("<Bucket><Name>{name}</Name><CreationDate>2024-01-01T00:00:00.000Z</CreationDate></Bucket>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><ListAllMyBucketsResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/"><Owner><ID>owner</ID><DisplayName>owner</DisplayName></Owner><Buckets>{buckets}</Buckets></ListAllMyBucketsResult>"#
    )
}

pub(crate) fn list_objects_body(bucket: &str, keys: &[&str], next_token: Option<&str>) -> String {
    let contents: String = keys.iter()
        .map(|key| format!("<Contents><Key>{key}</Key><Size>1</Size><StorageClass>STANDARD</StorageClass></Contents>"))
        .collect();
    let truncation = match next_token {
        Some(token) => format!("<IsTruncated>true</IsTruncated><NextContinuationToken>{token}</NextContinuationToken>"),
        None => "<IsTruncated>false</IsTruncated>".to_owned(),
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/"><Name>{bucket}</Name><Prefix></Prefix><KeyCount>{}</KeyCount><MaxKeys>1000</MaxKeys>{truncation}{contents}</ListBucketResult>"#,
        keys.len()
    )
}
