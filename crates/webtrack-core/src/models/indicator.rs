//! 인디케이터 모델.
//!
//! 한 스텝 동안 수집된 값을 요약하는 외부 집계 객체.
//! 라이터는 스텝마다 한 번 읽고 버린다. 숫자형/기타를 닫힌 enum으로 구분하며,
//! 라이터는 태그로 분기한다.

use serde::{Deserialize, Serialize};

/// 스텝 단위 인디케이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Indicator {
    /// 스칼라 평균 (키 = 이름)
    Scalar(NumericIndicator),
    /// 히스토그램 (키 = `<이름>.mean`)
    Histogram(NumericIndicator),
    /// 숫자형이 아닌 인디케이터 (큐, 인덱스 등): 웹 전송 대상 아님
    Other(OtherIndicator),
}

/// 숫자형 인디케이터: 스텝 동안 수집된 값 목록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericIndicator {
    pub name: String,
    /// 출력(전송) 대상 여부
    #[serde(default = "default_true")]
    pub is_print: bool,
    #[serde(default)]
    pub values: Vec<f64>,
}

/// 숫자형이 아닌 인디케이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherIndicator {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_print: bool,
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
}

/// 숫자형 인디케이터에서 라이터가 읽어가는 값
#[derive(Debug, Clone, PartialEq)]
pub struct NumericView {
    /// 시리즈 키
    pub mean_key: String,
    /// 현재 평균값
    pub mean: f64,
}

impl NumericIndicator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_print: true,
            values: Vec::new(),
        }
    }

    /// 출력 여부 설정
    pub fn with_print(mut self, is_print: bool) -> Self {
        self.is_print = is_print;
        self
    }

    /// 값 하나 수집
    pub fn collect(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 수집된 값의 평균. 비어 있으면 `None`.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }
}

impl Indicator {
    /// 스칼라 인디케이터를 값 목록으로 생성
    pub fn scalar(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let mut ind = NumericIndicator::new(name);
        ind.values.extend(values);
        Indicator::Scalar(ind)
    }

    /// 히스토그램 인디케이터를 값 목록으로 생성
    pub fn histogram(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let mut ind = NumericIndicator::new(name);
        ind.values.extend(values);
        Indicator::Histogram(ind)
    }

    pub fn name(&self) -> &str {
        match self {
            Indicator::Scalar(ind) | Indicator::Histogram(ind) => &ind.name,
            Indicator::Other(ind) => &ind.name,
        }
    }

    pub fn is_print(&self) -> bool {
        match self {
            Indicator::Scalar(ind) | Indicator::Histogram(ind) => ind.is_print,
            Indicator::Other(ind) => ind.is_print,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Indicator::Scalar(ind) | Indicator::Histogram(ind) => ind.is_empty(),
            Indicator::Other(ind) => ind.values.is_empty(),
        }
    }

    /// 시리즈 키
    ///
    /// 히스토그램은 분포 전체가 아닌 평균만 전송하므로 `.mean` 접미사를 붙인다.
    pub fn mean_key(&self) -> String {
        match self {
            Indicator::Histogram(ind) => format!("{}.mean", ind.name),
            _ => self.name().to_string(),
        }
    }

    /// 숫자형이고 비어 있지 않으면 (키, 평균) 반환
    pub fn numeric(&self) -> Option<NumericView> {
        match self {
            Indicator::Scalar(ind) | Indicator::Histogram(ind) => {
                ind.mean().map(|mean| NumericView {
                    mean_key: self.mean_key(),
                    mean,
                })
            }
            Indicator::Other(_) => None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_mean_and_key() {
        let ind = Indicator::scalar("loss", [1.0, 2.0, 3.0]);
        let view = ind.numeric().unwrap();
        assert_eq!(view.mean_key, "loss");
        assert!((view.mean - 2.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_key_has_mean_suffix() {
        let ind = Indicator::histogram("grad_norm", [0.5, 1.5]);
        assert_eq!(ind.mean_key(), "grad_norm.mean");
        assert_eq!(ind.numeric().unwrap().mean, 1.0);
    }

    #[test]
    fn empty_numeric_has_no_view() {
        let ind = Indicator::Scalar(NumericIndicator::new("loss"));
        assert!(ind.is_empty());
        assert!(ind.numeric().is_none());
    }

    #[test]
    fn other_is_never_numeric() {
        let ind = Indicator::Other(OtherIndicator {
            name: "samples".to_string(),
            is_print: true,
            values: vec![serde_json::json!("img_0.png")],
        });
        assert!(!ind.is_empty());
        assert!(ind.numeric().is_none());
    }

    #[test]
    fn deserialize_tagged_with_defaults() {
        let ind: Indicator =
            serde_json::from_str(r#"{"type":"scalar","name":"acc","values":[0.9]}"#).unwrap();
        assert!(ind.is_print());
        assert_eq!(ind.numeric().unwrap().mean, 0.9);

        let ind: Indicator =
            serde_json::from_str(r#"{"type":"histogram","name":"w","is_print":false}"#).unwrap();
        assert!(!ind.is_print());
        assert!(ind.is_empty());
    }

    #[test]
    fn collect_accumulates() {
        let mut ind = NumericIndicator::new("loss").with_print(false);
        ind.collect(4.0);
        ind.collect(2.0);
        assert_eq!(ind.mean(), Some(3.0));
        assert!(!ind.is_print);
    }
}
