//! Listing of external open APIs shown in the second tab of the results page.
//!
//! The listing is not served by the catalog API. [`StaticOpenApiCatalog`]
//! filters a fixed in-memory list; anything implementing [`OpenApiSource`]
//! can replace it.

use once_cell::sync::Lazy;

use crate::data_models::{OpenApiResult, OpenApiStatus, PageData};
use crate::search_service::SearchRequest;

pub trait OpenApiSource: Send + Sync {
    /// Matches for the request's filters. Without a `size` every match is
    /// returned on a single page.
    fn search(&self, request: &SearchRequest) -> PageData<OpenApiResult>;
    fn find(&self, id: i64) -> Option<OpenApiResult>;
}

/// Category → subjectDomain code.
const CATEGORY_DOMAINS: &[(&str, &str)] = &[
    ("weather", "DISASTER_CLIMATE_RISK"),
    ("wildfire", "DISASTER_CLIMATE_RISK"),
    ("drought_monitoring", "DISASTER_CLIMATE_RISK"),
    ("environment", "RESOURCE_ENVIRONMENTAL_MANAGEMENT"),
    ("water_supply", "RESOURCE_ENVIRONMENTAL_MANAGEMENT"),
    ("agriculture", "CLIMATE_IMPACT_INDUSTRY"),
    ("fisheries", "CLIMATE_IMPACT_INDUSTRY"),
    ("energy", "CLIMATE_IMPACT_INDUSTRY"),
    ("transportation", "SOCIO_ECONOMIC_IMPACT"),
    ("infrastructure", "SOCIO_ECONOMIC_IMPACT"),
];

/// Category → Korean label.
const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("weather", "날씨"),
    ("environment", "환경"),
    ("agriculture", "농업"),
    ("fisheries", "수산"),
    ("wildfire", "산불"),
    ("energy", "에너지"),
    ("water_supply", "수자원"),
    ("transportation", "교통"),
    ("drought_monitoring", "가뭄모니터링"),
    ("infrastructure", "인프라"),
];

/// Provider → source code.
const PROVIDER_SOURCES: &[(&str, &str)] = &[
    ("기상청", "domestic"),
    ("한국농어촌공사", "domestic"),
    ("산림청", "domestic"),
    ("환경부", "domestic"),
    ("한국수자원공사", "domestic"),
    ("국토교통부", "domestic"),
    ("해양수산부", "domestic"),
    ("NOAA", "foreign"),
    ("NASA", "foreign"),
    ("Copernicus", "foreign"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn domain_for_category(category: &str) -> &'static str {
    lookup(CATEGORY_DOMAINS, category).unwrap_or("OTHERS")
}

pub fn source_for_provider(provider: &str) -> &'static str {
    lookup(PROVIDER_SOURCES, provider).unwrap_or("domestic")
}

/// Category label, echoing unknown categories.
pub fn category_label(category: &str) -> String {
    lookup(CATEGORY_LABELS, category)
        .map(str::to_string)
        .unwrap_or_else(|| category.to_string())
}

struct Seed {
    title: &'static str,
    description: &'static str,
    api_url: &'static str,
    provider: &'static str,
    category: &'static str,
    document_type: &'static str,
    updated_at: &'static str,
    status: OpenApiStatus,
    response_format: &'static str,
    rate_limit: Option<&'static str>,
    authentication: Option<&'static str>,
}

const SEEDS: &[Seed] = &[
    Seed {
        title: "고랭지배추 주산지 가뭄 영향 지도 API",
        description: "가뭄 시기별 고랭지배추 주산지의 생산 영향도를 지도 정보로 제공합니다.",
        api_url: "https://apis.data.go.kr/B552149/droughtCabbageMap",
        provider: "한국농어촌공사",
        category: "agriculture",
        document_type: "DATA_TECHNICAL",
        updated_at: "2025-06-30T09:00:00",
        status: OpenApiStatus::Active,
        response_format: "JSON",
        rate_limit: Some("1,000 요청/일"),
        authentication: Some("API Key"),
    },
    Seed {
        title: "저수지 수위 실시간 조회 API",
        description: "전국 농업용 저수지의 실시간 저수율과 수위 정보를 제공합니다.",
        api_url: "https://apis.data.go.kr/B552149/reservoirLevel",
        provider: "한국농어촌공사",
        category: "drought_monitoring",
        document_type: "DATA_TECHNICAL",
        updated_at: "2025-07-01T06:30:00",
        status: OpenApiStatus::Active,
        response_format: "JSON, XML",
        rate_limit: Some("10,000 요청/일"),
        authentication: Some("API Key"),
    },
    Seed {
        title: "동네예보 조회 서비스",
        description: "읍면동 단위의 단기 기상 예보와 초단기 실황 정보를 제공합니다.",
        api_url: "https://apis.data.go.kr/1360000/VilageFcstInfoService_2.0",
        provider: "기상청",
        category: "weather",
        document_type: "DATA_TECHNICAL",
        updated_at: "2025-07-03T05:00:00",
        status: OpenApiStatus::Active,
        response_format: "JSON, XML",
        rate_limit: Some("10,000 요청/일"),
        authentication: Some("API Key"),
    },
    Seed {
        title: "산불위험예보 정보 API",
        description: "시군구별 산불 위험 지수와 예보 등급을 제공합니다.",
        api_url: "https://apis.data.go.kr/1400000/forestFireRisk",
        provider: "산림청",
        category: "wildfire",
        document_type: "REPORT",
        updated_at: "2025-04-15T12:00:00",
        status: OpenApiStatus::Active,
        response_format: "XML",
        rate_limit: None,
        authentication: Some("API Key"),
    },
    Seed {
        title: "대기오염 측정소별 실시간 정보",
        description: "측정소별 미세먼지, 오존 등 대기오염 물질 농도를 제공합니다.",
        api_url: "https://apis.data.go.kr/B552584/ArpltnInforInqireSvc",
        provider: "환경부",
        category: "environment",
        document_type: "DATA_TECHNICAL",
        updated_at: "2025-05-20T10:00:00",
        status: OpenApiStatus::Active,
        response_format: "JSON",
        rate_limit: Some("500 요청/시간"),
        authentication: Some("API Key"),
    },
    Seed {
        title: "광역상수도 공급 현황 API",
        description: "광역상수도 정수장별 공급량과 수질 정보를 제공합니다.",
        api_url: "https://apis.data.go.kr/B500001/waterSupply",
        provider: "한국수자원공사",
        category: "water_supply",
        document_type: "POLICY_STANDARD",
        updated_at: "2024-12-11T15:20:00",
        status: OpenApiStatus::Inactive,
        response_format: "XML",
        rate_limit: None,
        authentication: None,
    },
    Seed {
        title: "Global Drought Monitor API",
        description: "Weekly global drought severity indices derived from satellite soil moisture.",
        api_url: "https://www.ncei.noaa.gov/access/monitoring/drought/api",
        provider: "NOAA",
        category: "drought_monitoring",
        document_type: "RESEARCH_SURVEY",
        updated_at: "2025-03-02T00:00:00",
        status: OpenApiStatus::Active,
        response_format: "JSON, CSV",
        rate_limit: Some("5 requests/second"),
        authentication: Some("Token"),
    },
    Seed {
        title: "Copernicus Climate Data Store API",
        description: "Reanalysis and climate projection datasets for impact studies.",
        api_url: "https://cds.climate.copernicus.eu/api",
        provider: "Copernicus",
        category: "weather",
        document_type: "RESEARCH_SURVEY",
        updated_at: "2025-02-18T08:00:00",
        status: OpenApiStatus::Active,
        response_format: "NetCDF, GRIB",
        rate_limit: None,
        authentication: Some("OAuth 2.0"),
    },
];

static ENTRIES: Lazy<Vec<OpenApiResult>> = Lazy::new(|| {
    SEEDS
        .iter()
        .enumerate()
        .map(|(i, seed)| OpenApiResult {
            id: i as i64 + 1,
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            api_url: seed.api_url.to_string(),
            provider: seed.provider.to_string(),
            category: seed.category.to_string(),
            document_type: seed.document_type.to_string(),
            subject_domain: domain_for_category(seed.category).to_string(),
            source: source_for_provider(seed.provider).to_string(),
            updated_at: seed.updated_at.to_string(),
            status: seed.status,
            response_format: seed.response_format.to_string(),
            rate_limit: seed.rate_limit.map(str::to_string),
            authentication: seed.authentication.map(str::to_string),
        })
        .collect()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticOpenApiCatalog;

impl StaticOpenApiCatalog {
    pub fn entries(&self) -> &'static [OpenApiResult] {
        &ENTRIES
    }

    fn matches(entry: &OpenApiResult, request: &SearchRequest) -> bool {
        if let Some(query) = set(&request.query) {
            let needle = query.to_lowercase();
            let hit = [&entry.title, &entry.description, &entry.provider]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(document_type) = set(&request.document_type) {
            if entry.document_type != document_type {
                return false;
            }
        }
        if let Some(domain) = set(&request.subject_domain) {
            if domain_for_category(&entry.category) != domain {
                return false;
            }
        }
        if let Some(source) = set(&request.source) {
            if source_for_provider(&entry.provider) != source {
                return false;
            }
        }
        true
    }
}

impl OpenApiSource for StaticOpenApiCatalog {
    fn search(&self, request: &SearchRequest) -> PageData<OpenApiResult> {
        let hits: Vec<OpenApiResult> = self
            .entries()
            .iter()
            .filter(|entry| Self::matches(entry, request))
            .cloned()
            .collect();
        let size = request.size.unwrap_or(hits.len() as u32);
        PageData::from_items(hits, request.page.unwrap_or(0), size)
    }

    fn find(&self, id: i64) -> Option<OpenApiResult> {
        self.entries().iter().find(|e| e.id == id).cloned()
    }
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SearchRequest {
        SearchRequest::default()
    }

    #[test]
    fn test_unfiltered_search_returns_everything() {
        let page = StaticOpenApiCatalog.search(&request());
        assert_eq!(page.total_elements as usize, SEEDS.len());
        assert_eq!(page.number, 0);
    }

    #[test]
    fn test_query_is_case_insensitive_over_title_description_provider() {
        let by_provider = StaticOpenApiCatalog.search(&SearchRequest {
            query: Some("noaa".into()),
            ..request()
        });
        assert_eq!(by_provider.content.len(), 1);
        assert_eq!(by_provider.content[0].provider, "NOAA");

        let by_description = StaticOpenApiCatalog.search(&SearchRequest {
            query: Some("저수율".into()),
            ..request()
        });
        assert_eq!(by_description.content.len(), 1);
    }

    #[test]
    fn test_subject_domain_and_source_use_mapping_tables() {
        let page = StaticOpenApiCatalog.search(&SearchRequest {
            subject_domain: Some("DISASTER_CLIMATE_RISK".into()),
            source: Some("foreign".into()),
            ..request()
        });
        let providers: Vec<&str> = page.content.iter().map(|e| e.provider.as_str()).collect();
        assert_eq!(providers, vec!["NOAA", "Copernicus"]);
    }

    #[test]
    fn test_unknown_filter_code_matches_nothing() {
        let page = StaticOpenApiCatalog.search(&SearchRequest {
            document_type: Some("ZZZ".into()),
            ..request()
        });
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_unsized_request_returns_every_match() {
        let all = StaticOpenApiCatalog.search(&request());
        assert_eq!(all.content.len(), SEEDS.len());
        assert_eq!(all.total_pages, 1);

        let sized = StaticOpenApiCatalog.search(&SearchRequest {
            page: Some(1),
            size: Some(5),
            ..request()
        });
        assert_eq!(sized.content.len(), SEEDS.len() - 5);
    }

    #[test]
    fn test_find_by_id() {
        assert_eq!(StaticOpenApiCatalog.find(3).unwrap().provider, "기상청");
        assert!(StaticOpenApiCatalog.find(999).is_none());
    }

    #[test]
    fn test_category_label_fallback() {
        assert_eq!(category_label("wildfire"), "산불");
        assert_eq!(category_label("space"), "space");
    }
}
