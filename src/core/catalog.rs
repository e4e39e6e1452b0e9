//! Product code to display name lookup.
//!
//! Codes are the `skuPartNumber` values the directory reports, without the
//! tenant namespace.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::types::strip_tenant_prefix;

const UNKNOWN_SKU: &str = "UNKNOWN SKU";

static FRIENDLY_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("AAD_BASIC", "AZURE ACTIVE DIRECTORY BASIC"),
        ("AAD_PREMIUM", "AZURE ACTIVE DIRECTORY PREMIUM P1"),
        ("AAD_PREMIUM_P2", "AZURE ACTIVE DIRECTORY PREMIUM P2"),
        ("ATP_ENTERPRISE", "EXCHANGE ONLINE ADVANCED THREAT PROTECTION"),
        ("CRMSTANDARD", "MICROSOFT DYNAMICS CRM ONLINE PROFESSIONAL"),
        ("DESKLESSPACK", "OFFICE 365 F3"),
        ("DEVELOPERPACK", "OFFICE 365 E3 DEVELOPER"),
        ("EMS", "ENTERPRISE MOBILITY + SECURITY E3"),
        ("EMSPREMIUM", "ENTERPRISE MOBILITY + SECURITY E5"),
        ("ENTERPRISEPACK", "OFFICE 365 E3"),
        ("ENTERPRISEPACKWITHOUTPROPLUS", "OFFICE 365 E3 WITHOUT PROPLUS"),
        ("ENTERPRISEPREMIUM", "OFFICE 365 E5"),
        ("ENTERPRISEPREMIUM_NOPSTNCONF", "OFFICE 365 E5 WITHOUT AUDIO CONFERENCING"),
        ("ENTERPRISEWITHSCAL", "OFFICE 365 E4"),
        ("EXCHANGEARCHIVE_ADDON", "EXCHANGE ONLINE ARCHIVING FOR EXCHANGE ONLINE"),
        ("EXCHANGEDESKLESS", "EXCHANGE ONLINE KIOSK"),
        ("EXCHANGEENTERPRISE", "EXCHANGE ONLINE (PLAN 2)"),
        ("EXCHANGESTANDARD", "EXCHANGE ONLINE (PLAN 1)"),
        ("FLOW_FREE", "MICROSOFT FLOW FREE"),
        ("INTUNE_A", "INTUNE"),
        ("M365EDU_A3_FACULTY", "MICROSOFT 365 A3 FOR FACULTY"),
        ("M365EDU_A3_STUDENT", "MICROSOFT 365 A3 FOR STUDENTS"),
        ("MCOEV", "MICROSOFT 365 PHONE SYSTEM"),
        ("MCOMEETADV", "AUDIO CONFERENCING"),
        ("MCOPSTN1", "DOMESTIC CALLING PLAN"),
        ("MCOPSTN2", "DOMESTIC AND INTERNATIONAL CALLING PLAN"),
        ("MCOSTANDARD", "SKYPE FOR BUSINESS ONLINE (PLAN 2)"),
        ("MS_TEAMS_IW", "MICROSOFT TEAMS TRIAL"),
        ("O365_BUSINESS", "MICROSOFT 365 APPS FOR BUSINESS"),
        ("O365_BUSINESS_ESSENTIALS", "MICROSOFT 365 BUSINESS BASIC"),
        ("O365_BUSINESS_PREMIUM", "MICROSOFT 365 BUSINESS STANDARD"),
        ("OFFICESUBSCRIPTION", "MICROSOFT 365 APPS FOR ENTERPRISE"),
        ("POWERAPPS_VIRAL", "MICROSOFT POWER APPS PLAN 2 TRIAL"),
        ("POWER_BI_PRO", "POWER BI PRO"),
        ("POWER_BI_STANDARD", "POWER BI (FREE)"),
        ("PROJECTESSENTIALS", "PROJECT ONLINE ESSENTIALS"),
        ("PROJECTPREMIUM", "PROJECT ONLINE PREMIUM"),
        ("PROJECTPROFESSIONAL", "PROJECT PLAN 3"),
        ("RIGHTSMANAGEMENT", "AZURE INFORMATION PROTECTION PLAN 1"),
        ("SHAREPOINTENTERPRISE", "SHAREPOINT ONLINE (PLAN 2)"),
        ("SHAREPOINTSTANDARD", "SHAREPOINT ONLINE (PLAN 1)"),
        ("SPB", "MICROSOFT 365 BUSINESS PREMIUM"),
        ("SPE_E3", "MICROSOFT 365 E3"),
        ("SPE_E5", "MICROSOFT 365 E5"),
        ("SPE_F1", "MICROSOFT 365 F3"),
        ("STANDARDPACK", "OFFICE 365 E1"),
        ("STANDARDWOFFPACK", "OFFICE 365 E2"),
        ("STREAM", "MICROSOFT STREAM"),
        ("VISIOCLIENT", "VISIO PLAN 2"),
        ("VISIOONLINE_PLAN1", "VISIO PLAN 1"),
        ("WIN10_PRO_ENT_SUB", "WINDOWS 10 ENTERPRISE E3"),
        ("WIN_DEF_ATP", "MICROSOFT DEFENDER FOR ENDPOINT"),
        ("YAMMER_ENTERPRISE", "YAMMER ENTERPRISE"),
    ]
    .into_iter()
    .collect()
});

/// Display name for a SKU id.
///
/// Strips the `tenant:` namespace and looks the remaining product code up in
/// the catalog. Unknown codes come back unchanged. The result is never empty:
/// an id with an empty product code resolves to the id itself.
pub fn resolve(sku_id: &str) -> String {
    if sku_id.is_empty() {
        return UNKNOWN_SKU.to_string();
    }

    let code = strip_tenant_prefix(sku_id);
    if code.is_empty() {
        return sku_id.to_string();
    }

    match FRIENDLY_NAMES.get(code) {
        Some(name) => (*name).to_string(),
        None => code.to_string(),
    }
}
