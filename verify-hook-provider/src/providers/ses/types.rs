//! SES Query API 响应结构
//!
//! 响应根元素为 `<{Action}Response>`，结果在 `<{Action}Result>` 子元素中。

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct VerifyDomainIdentityResponse {
    #[serde(rename = "VerifyDomainIdentityResult")]
    pub result: VerifyDomainIdentityResult,
}

#[derive(Debug, Deserialize)]
pub struct VerifyDomainIdentityResult {
    #[serde(rename = "VerificationToken")]
    pub verification_token: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyDomainDkimResponse {
    #[serde(rename = "VerifyDomainDkimResult")]
    pub result: VerifyDomainDkimResult,
}

#[derive(Debug, Deserialize)]
pub struct VerifyDomainDkimResult {
    #[serde(rename = "DkimTokens", default)]
    pub dkim_tokens: MemberList,
}

/// Query API 列表：`<X><member>..</member>...</X>`
#[derive(Debug, Default, Deserialize)]
pub struct MemberList {
    #[serde(rename = "member", default)]
    pub members: Vec<String>,
}

/// `DeleteIdentity` 没有结果字段，只确认响应可解析
#[derive(Debug, Deserialize)]
pub struct DeleteIdentityResponse {}
