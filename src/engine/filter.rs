// src/engine/filter.rs

use chrono::NaiveDate;

use crate::models::sales::Sale;

/// Intervalo de datas fechado nas duas pontas.
///
/// Uma ponta ausente é ilimitada (-∞ ou +∞). Sem nenhuma ponta, o intervalo
/// cobre a tabela inteira, que é o comportamento do painel quando o usuário
/// não escolhe duas datas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    // Início depois do fim: seleção vazia, não é erro.
    pub fn is_empty(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Restringe a tabela de vendas ao intervalo, preservando a ordem original.
/// Devolve uma nova tabela (visão emprestada); a entrada nunca é alterada.
pub fn filter_sales<'a>(sales: &'a [Sale], range: &DateRange) -> Vec<&'a Sale> {
    if range.is_empty() {
        return Vec::new();
    }

    sales.iter().filter(|sale| range.contains(sale.date)).collect()
}
