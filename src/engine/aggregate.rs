// src/engine/aggregate.rs

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

use crate::common::error::AppError;

/// Uma linha de tabela resumo: a chave do grupo e a medida somada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<K> {
    pub key: K,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ordem da chave (é a ordem que `aggregate` já devolve).
    Key,
    TotalAscending,
    TotalDescending,
}

/// Agrupa as linhas pela chave exata e soma a medida de cada grupo.
///
/// Chaves compostas são tuplas: `|r| (r.state.clone(), r.month)`. O resultado
/// tem uma linha por chave distinta, em ordem crescente de chave. A soma é feita
/// da esquerda para a direita em `Decimal`, que é exato, então repetir a chamada
/// sobre a mesma entrada sempre devolve o mesmo resultado.
pub fn aggregate<R, K, I, G, M>(
    rows: I,
    group_key: G,
    measure: M,
) -> Result<Vec<Summary<K>>, AppError>
where
    I: IntoIterator<Item = R>,
    K: Ord,
    G: Fn(&R) -> K,
    M: Fn(&R) -> Decimal,
{
    let mut groups: BTreeMap<K, Decimal> = BTreeMap::new();

    for row in rows {
        let total = groups.entry(group_key(&row)).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(measure(&row))
            .ok_or(AppError::TotalOverflow)?;
    }

    Ok(groups
        .into_iter()
        .map(|(key, total)| Summary { key, total })
        .collect())
}

/// Ordenação estável: totais iguais mantêm a ordem de chave.
pub fn sort_summary<K: Ord>(rows: &mut [Summary<K>], order: SortOrder) {
    match order {
        SortOrder::Key => rows.sort_by(|a, b| a.key.cmp(&b.key)),
        SortOrder::TotalAscending => rows.sort_by(|a, b| a.total.cmp(&b.total)),
        SortOrder::TotalDescending => rows.sort_by(|a, b| b.total.cmp(&a.total)),
    }
}

/// Trunca a data para o dia 1 do mesmo mês.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rows() -> Vec<(&'static str, &'static str, Decimal)> {
        vec![
            ("Papelaria", "SP", Decimal::new(1050, 2)),
            ("Informática", "RJ", Decimal::from(200)),
            ("Papelaria", "RJ", Decimal::new(495, 2)),
            ("Papelaria", "SP", Decimal::from(3)),
            ("Informática", "RJ", Decimal::new(1, 1)),
        ]
    }

    #[test]
    fn groups_and_sums_by_single_key() {
        let summary = aggregate(rows(), |r| r.0, |r| r.2).unwrap();

        assert_eq!(
            summary,
            vec![
                Summary { key: "Informática", total: Decimal::new(2001, 1) },
                Summary { key: "Papelaria", total: Decimal::new(1845, 2) },
            ]
        );
    }

    #[test]
    fn groups_by_composite_key() {
        let summary = aggregate(rows(), |r| (r.0, r.1), |r| r.2).unwrap();

        let keys: Vec<(&str, &str)> = summary.iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![("Informática", "RJ"), ("Papelaria", "RJ"), ("Papelaria", "SP")]
        );
        assert_eq!(summary[2].total, Decimal::new(1350, 2));
    }

    #[test]
    fn is_idempotent() {
        let first = aggregate(rows(), |r| r.1, |r| r.2).unwrap();
        let second = aggregate(rows(), |r| r.1, |r| r.2).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn conserves_the_sum() {
        let input_total: Decimal = rows().iter().map(|r| r.2).sum();
        let summary = aggregate(rows(), |r| (r.0, r.1), |r| r.2).unwrap();
        let output_total: Decimal = summary.iter().map(|s| s.total).sum();

        assert_eq!(input_total, output_total);
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        let empty: Vec<(&str, Decimal)> = Vec::new();

        assert!(aggregate(empty, |r| r.0, |r| r.1).unwrap().is_empty());
    }

    #[test]
    fn overflow_is_reported() {
        let huge = vec![("x", Decimal::MAX), ("x", Decimal::MAX)];

        let result = aggregate(huge, |r| r.0, |r| r.1);

        assert!(matches!(result, Err(AppError::TotalOverflow)));
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let mut summary = vec![
            Summary { key: "a", total: Decimal::from(5) },
            Summary { key: "b", total: Decimal::from(9) },
            Summary { key: "c", total: Decimal::from(5) },
        ];

        sort_summary(&mut summary, SortOrder::TotalDescending);
        let keys: Vec<&str> = summary.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);

        sort_summary(&mut summary, SortOrder::TotalAscending);
        let keys: Vec<&str> = summary.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["a", "c", "b"]);

        sort_summary(&mut summary, SortOrder::Key);
        let keys: Vec<&str> = summary.iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn month_start_truncates_day() {
        assert_eq!(month_start(date(2024, 1, 5)), date(2024, 1, 1));
        assert_eq!(month_start(date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(month_start(date(2024, 2, 29)), date(2024, 2, 1));
    }

    #[test]
    fn month_start_respects_year_boundary() {
        let december = month_start(date(2023, 12, 15));
        let january = month_start(date(2024, 1, 10));

        assert_eq!(december, date(2023, 12, 1));
        assert_eq!(january, date(2024, 1, 1));
        assert_ne!(december, january);
    }
}
