//! Code tables for the three filter dimensions.
//!
//! Every renderer (filter selects, filter tags, result tags, detail views)
//! goes through these tables. A code that is not in a table is displayed
//! as-is.

use serde::Serialize;

/// An enumerated catalog code with a Korean display label.
pub trait CatalogCode: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn code(&self) -> &'static str;
    fn label(&self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Numeric id used by the remote API, 1-based in table order.
    fn id(&self) -> u32 {
        let code = self.code();
        Self::ALL
            .iter()
            .position(|c| c.code() == code)
            .map(|i| i as u32 + 1)
            .unwrap_or(0)
    }

    /// Display label for a raw code, echoing unknown codes unchanged.
    fn label_or_raw(raw: &str) -> String {
        Self::from_code(raw)
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| raw.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    ResearchSurvey,
    PolicyStandard,
    Report,
    DataTechnical,
    PlanningProposal,
    Others,
}

impl CatalogCode for DocumentType {
    const ALL: &'static [Self] = &[
        Self::ResearchSurvey,
        Self::PolicyStandard,
        Self::Report,
        Self::DataTechnical,
        Self::PlanningProposal,
        Self::Others,
    ];

    fn code(&self) -> &'static str {
        match self {
            Self::ResearchSurvey => "RESEARCH_SURVEY",
            Self::PolicyStandard => "POLICY_STANDARD",
            Self::Report => "REPORT",
            Self::DataTechnical => "DATA_TECHNICAL",
            Self::PlanningProposal => "PLANNING_PROPOSAL",
            Self::Others => "OTHERS",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::ResearchSurvey => "연구/조사 자료",
            Self::PolicyStandard => "정책/기준 문서",
            Self::Report => "보고서",
            Self::DataTechnical => "데이터/기술 자료",
            Self::PlanningProposal => "기획/계획 문서",
            Self::Others => "기타",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectDomain {
    ClimateImpactIndustry,
    ResourceEnvironmentalManagement,
    DisasterClimateRisk,
    SocioEconomicImpact,
    RegionalExternalReference,
    Others,
}

impl CatalogCode for SubjectDomain {
    const ALL: &'static [Self] = &[
        Self::ClimateImpactIndustry,
        Self::ResourceEnvironmentalManagement,
        Self::DisasterClimateRisk,
        Self::SocioEconomicImpact,
        Self::RegionalExternalReference,
        Self::Others,
    ];

    fn code(&self) -> &'static str {
        match self {
            Self::ClimateImpactIndustry => "CLIMATE_IMPACT_INDUSTRY",
            Self::ResourceEnvironmentalManagement => "RESOURCE_ENVIRONMENTAL_MANAGEMENT",
            Self::DisasterClimateRisk => "DISASTER_CLIMATE_RISK",
            Self::SocioEconomicImpact => "SOCIO_ECONOMIC_IMPACT",
            Self::RegionalExternalReference => "REGIONAL_EXTERNAL_REFERENCE",
            Self::Others => "OTHERS",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::ClimateImpactIndustry => "기후 영향 산업 분야",
            Self::ResourceEnvironmentalManagement => "자원 및 환경 관리",
            Self::DisasterClimateRisk => "재난 및 기후 리스크",
            Self::SocioEconomicImpact => "사회/경제적 영향",
            Self::RegionalExternalReference => "지역/외부 참조 정보",
            Self::Others => "기타",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Domestic,
    Foreign,
}

impl CatalogCode for Source {
    const ALL: &'static [Self] = &[Self::Domestic, Self::Foreign];

    fn code(&self) -> &'static str {
        match self {
            Self::Domestic => "domestic",
            Self::Foreign => "foreign",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Domestic => "국내",
            Self::Foreign => "해외",
        }
    }
}

/// One of the independent facets narrowing search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    DocumentType,
    SubjectDomain,
    Source,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [
        FilterDimension::DocumentType,
        FilterDimension::SubjectDomain,
        FilterDimension::Source,
    ];

    /// Query-string key, also the JSON field name.
    pub fn key(&self) -> &'static str {
        match self {
            FilterDimension::DocumentType => "documentType",
            FilterDimension::SubjectDomain => "subjectDomain",
            FilterDimension::Source => "source",
        }
    }

    pub fn from_key(key: &str) -> Option<FilterDimension> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterDimension::DocumentType => "문서성격",
            FilterDimension::SubjectDomain => "주제영역",
            FilterDimension::Source => "출처",
        }
    }

    /// Placeholder shown for the empty option of the select.
    pub fn placeholder(&self) -> &'static str {
        match self {
            FilterDimension::DocumentType => "문서 성격",
            FilterDimension::SubjectDomain => "주제 영역",
            FilterDimension::Source => "출처",
        }
    }

    pub fn display_label(&self, raw: &str) -> String {
        match self {
            FilterDimension::DocumentType => DocumentType::label_or_raw(raw),
            FilterDimension::SubjectDomain => SubjectDomain::label_or_raw(raw),
            FilterDimension::Source => Source::label_or_raw(raw),
        }
    }

    pub fn is_known(&self, raw: &str) -> bool {
        match self {
            FilterDimension::DocumentType => DocumentType::from_code(raw).is_some(),
            FilterDimension::SubjectDomain => SubjectDomain::from_code(raw).is_some(),
            FilterDimension::Source => Source::from_code(raw).is_some(),
        }
    }

    pub fn options(&self) -> Vec<SelectOption> {
        match self {
            FilterDimension::DocumentType => options_of::<DocumentType>(),
            FilterDimension::SubjectDomain => options_of::<SubjectDomain>(),
            FilterDimension::Source => options_of::<Source>(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

fn options_of<C: CatalogCode>() -> Vec<SelectOption> {
    C::ALL
        .iter()
        .map(|c| SelectOption {
            value: c.code(),
            label: c.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_echoes_raw_value() {
        assert_eq!(FilterDimension::DocumentType.display_label("ZZZ"), "ZZZ");
        assert_eq!(FilterDimension::Source.display_label("martian"), "martian");
    }

    #[test]
    fn known_codes_map_to_labels() {
        assert_eq!(FilterDimension::DocumentType.display_label("REPORT"), "보고서");
        assert_eq!(FilterDimension::Source.display_label("foreign"), "해외");
        assert_eq!(
            FilterDimension::SubjectDomain.display_label("DISASTER_CLIMATE_RISK"),
            "재난 및 기후 리스크"
        );
    }

    #[test]
    fn ids_follow_table_order() {
        assert_eq!(DocumentType::ResearchSurvey.id(), 1);
        assert_eq!(DocumentType::Others.id(), 6);
        assert_eq!(SubjectDomain::SocioEconomicImpact.id(), 4);
    }

    #[test]
    fn dimension_keys_round_trip() {
        for dim in FilterDimension::ALL {
            assert_eq!(FilterDimension::from_key(dim.key()), Some(dim));
        }
        assert_eq!(FilterDimension::from_key("category"), None);
    }
}
