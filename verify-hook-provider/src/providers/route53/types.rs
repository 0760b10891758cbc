//! Route 53 XML request and response bodies
//!
//! Responses only declare the children we read; quick-xml skips the rest
//! (`CallerReference`, `DelegationSet`, the root `xmlns` attribute, ...).

use serde::{Deserialize, Serialize};

use crate::types::{Change, ChangeBatch};

// ============ Responses ============

/// `<HostedZone>` element.
#[derive(Debug, Deserialize)]
pub struct HostedZoneXml {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Config", default)]
    pub config: Option<HostedZoneConfigXml>,
    #[serde(rename = "ResourceRecordSetCount", default)]
    pub resource_record_set_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct HostedZoneConfigXml {
    #[serde(rename = "PrivateZone", default)]
    pub private_zone: bool,
}

/// `<HostedZones>` wrapper; empty when nothing sorts at or after the query name.
#[derive(Debug, Default, Deserialize)]
pub struct HostedZoneList {
    #[serde(rename = "HostedZone", default)]
    pub zones: Vec<HostedZoneXml>,
}

/// `GET /2013-04-01/hostedzonesbyname`
#[derive(Debug, Deserialize)]
pub struct ListHostedZonesByNameResponse {
    #[serde(rename = "HostedZones", default)]
    pub hosted_zones: HostedZoneList,
}

/// `GET /2013-04-01/hostedzone/{id}`
#[derive(Debug, Deserialize)]
pub struct GetHostedZoneResponse {
    #[serde(rename = "HostedZone")]
    pub hosted_zone: HostedZoneXml,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordDataXml {
    #[serde(rename = "RecordDataEntry", default)]
    pub entries: Vec<String>,
}

/// `GET /2013-04-01/testdnsanswer`
#[derive(Debug, Deserialize)]
pub struct TestDnsAnswerResponse {
    #[serde(rename = "RecordData", default)]
    pub record_data: RecordDataXml,
    #[serde(rename = "ResponseCode")]
    pub response_code: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeInfoXml {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Status")]
    pub status: String,
    /// ISO 8601, parsed by the provider.
    #[serde(rename = "SubmittedAt", default)]
    pub submitted_at: Option<String>,
}

/// `POST /2013-04-01/hostedzone/{id}/rrset/`
#[derive(Debug, Deserialize)]
pub struct ChangeResourceRecordSetsResponse {
    #[serde(rename = "ChangeInfo")]
    pub change_info: ChangeInfoXml,
}

/// `<InvalidChangeBatch><Messages><Message/>...</Messages></InvalidChangeBatch>`
///
/// Route 53 uses this body instead of the usual `ErrorResponse` when a batch is rejected.
#[derive(Debug, Deserialize)]
pub struct InvalidChangeBatchXml {
    #[serde(rename = "Messages", default)]
    pub messages: MessagesXml,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessagesXml {
    #[serde(rename = "Message", default)]
    pub message: Vec<String>,
}

// ============ Requests ============

/// Body of `ChangeResourceRecordSets`.
#[derive(Debug, Serialize)]
#[serde(rename = "ChangeResourceRecordSetsRequest")]
pub struct ChangeResourceRecordSetsRequest<'a> {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "ChangeBatch")]
    pub change_batch: ChangeBatchXml<'a>,
}

#[derive(Debug, Serialize)]
pub struct ChangeBatchXml<'a> {
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    #[serde(rename = "Changes")]
    pub changes: ChangesXml<'a>,
}

#[derive(Debug, Serialize)]
pub struct ChangesXml<'a> {
    #[serde(rename = "Change")]
    pub change: Vec<ChangeXml<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChangeXml<'a> {
    #[serde(rename = "Action")]
    pub action: &'static str,
    #[serde(rename = "ResourceRecordSet")]
    pub record_set: ResourceRecordSetXml<'a>,
}

#[derive(Debug, Serialize)]
pub struct ResourceRecordSetXml<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Type")]
    pub record_type: &'static str,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    #[serde(rename = "ResourceRecords")]
    pub resource_records: ResourceRecordsXml<'a>,
}

#[derive(Debug, Serialize)]
pub struct ResourceRecordsXml<'a> {
    #[serde(rename = "ResourceRecord")]
    pub resource_record: Vec<ResourceRecordXml<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ResourceRecordXml<'a> {
    #[serde(rename = "Value")]
    pub value: &'a str,
}

impl<'a> ChangeResourceRecordSetsRequest<'a> {
    pub fn new(xmlns: &'static str, batch: &'a ChangeBatch) -> Self {
        Self {
            xmlns,
            change_batch: ChangeBatchXml {
                comment: batch.comment.as_deref(),
                changes: ChangesXml {
                    change: batch.changes.iter().map(ChangeXml::from).collect(),
                },
            },
        }
    }
}

impl<'a> From<&'a Change> for ChangeXml<'a> {
    fn from(change: &'a Change) -> Self {
        let rrset = &change.record_set;
        Self {
            action: change.action.as_str(),
            record_set: ResourceRecordSetXml {
                name: &rrset.name,
                record_type: rrset.record_type.as_str(),
                ttl: rrset.ttl,
                resource_records: ResourceRecordsXml {
                    resource_record: rrset
                        .values
                        .iter()
                        .map(|value| ResourceRecordXml { value })
                        .collect(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChangeAction, RecordType, ResourceRecordSet};

    #[test]
    fn list_by_name_response_parses_zones() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListHostedZonesByNameResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <HostedZones>
    <HostedZone>
      <Id>/hostedzone/Z1D633PJN98FT9</Id>
      <Name>example.com.</Name>
      <CallerReference>2014-04-01T18:43:13Z</CallerReference>
      <Config><PrivateZone>false</PrivateZone></Config>
      <ResourceRecordSetCount>4</ResourceRecordSetCount>
    </HostedZone>
  </HostedZones>
  <DNSName>example.com</DNSName>
  <IsTruncated>false</IsTruncated>
  <MaxItems>1</MaxItems>
</ListHostedZonesByNameResponse>"#;
        let resp: ListHostedZonesByNameResponse = quick_xml::de::from_str(body).unwrap();
        assert_eq!(resp.hosted_zones.zones.len(), 1);
        let zone = &resp.hosted_zones.zones[0];
        assert_eq!(zone.id, "/hostedzone/Z1D633PJN98FT9");
        assert_eq!(zone.name, "example.com.");
        assert_eq!(zone.resource_record_set_count, Some(4));
        assert!(!zone.config.as_ref().unwrap().private_zone);
    }

    #[test]
    fn empty_zone_list_parses() {
        let body = r#"<ListHostedZonesByNameResponse><HostedZones/><IsTruncated>false</IsTruncated></ListHostedZonesByNameResponse>"#;
        let resp: ListHostedZonesByNameResponse = quick_xml::de::from_str(body).unwrap();
        assert!(resp.hosted_zones.zones.is_empty());
    }

    #[test]
    fn test_dns_answer_parses_record_data() {
        let body = r#"<TestDNSAnswerResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <Nameserver>ns-2048.awsdns-64.com</Nameserver>
  <RecordName>sub.example.com</RecordName>
  <RecordType>NS</RecordType>
  <RecordData>
    <RecordDataEntry>ns-1.awsdns-01.org.</RecordDataEntry>
    <RecordDataEntry>ns-2.awsdns-02.net.</RecordDataEntry>
  </RecordData>
  <ResponseCode>NOERROR</ResponseCode>
  <Protocol>UDP</Protocol>
</TestDNSAnswerResponse>"#;
        let resp: TestDnsAnswerResponse = quick_xml::de::from_str(body).unwrap();
        assert_eq!(resp.response_code, "NOERROR");
        assert_eq!(resp.record_data.entries.len(), 2);
    }

    #[test]
    fn invalid_change_batch_messages_parse() {
        let body = r#"<InvalidChangeBatch xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <Messages>
    <Message>Tried to delete resource record set [name='_x.example.com.', type='TXT'] but it was not found</Message>
  </Messages>
</InvalidChangeBatch>"#;
        let resp: InvalidChangeBatchXml = quick_xml::de::from_str(body).unwrap();
        assert_eq!(resp.messages.message.len(), 1);
        assert!(resp.messages.message[0].contains("not found"));
    }

    #[test]
    fn change_request_serializes_batch() {
        let batch = ChangeBatch {
            comment: Some("verify".to_string()),
            changes: vec![Change {
                action: ChangeAction::Upsert,
                record_set: ResourceRecordSet {
                    name: "_x.example.com".to_string(),
                    record_type: RecordType::Cname,
                    ttl: 60,
                    values: vec!["_y.acm-validations.aws.".to_string()],
                },
            }],
        };
        let xml = quick_xml::se::to_string(&ChangeResourceRecordSetsRequest::new(
            "https://route53.amazonaws.com/doc/2013-04-01/",
            &batch,
        ))
        .unwrap();

        assert!(xml.starts_with(
            r#"<ChangeResourceRecordSetsRequest xmlns="https://route53.amazonaws.com/doc/2013-04-01/">"#
        ));
        assert!(xml.contains("<Comment>verify</Comment>"));
        assert!(xml.contains("<Action>UPSERT</Action>"));
        assert!(xml.contains("<Name>_x.example.com</Name>"));
        assert!(xml.contains("<Type>CNAME</Type>"));
        assert!(xml.contains("<TTL>60</TTL>"));
        assert!(xml.contains(
            "<ResourceRecords><ResourceRecord><Value>_y.acm-validations.aws.</Value></ResourceRecord></ResourceRecords>"
        ));
    }

    #[test]
    fn comment_is_omitted_when_absent() {
        let batch = ChangeBatch {
            comment: None,
            changes: Vec::new(),
        };
        let xml =
            quick_xml::se::to_string(&ChangeResourceRecordSetsRequest::new("urn:x", &batch)).unwrap();
        assert!(!xml.contains("Comment"));
    }
}
