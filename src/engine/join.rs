// src/engine/join.rs

use std::collections::HashMap;

use crate::models::sales::Dimension;

/// Tabela dimensão com o índice hash da sua coluna identificadora.
///
/// O índice é montado uma única vez, quando a tabela é carregada, e reaproveitado
/// por todos os relatórios. Chaves duplicadas violam a integridade dos dados:
/// a primeira linha encontrada vence e as demais são ignoradas.
#[derive(Debug, Clone)]
pub struct DimensionTable<D> {
    rows: Vec<D>,
    positions: HashMap<String, usize>,
}

impl<D: Dimension> DimensionTable<D> {
    pub fn new(name: &str, rows: Vec<D>) -> Self {
        let mut positions = HashMap::with_capacity(rows.len());
        let mut duplicates = 0usize;

        for (pos, row) in rows.iter().enumerate() {
            if positions.contains_key(row.key()) {
                duplicates += 1;
                continue;
            }
            positions.insert(row.key().to_string(), pos);
        }

        if duplicates > 0 {
            tracing::warn!(
                "⚠️ Tabela '{}' tem {} chave(s) duplicada(s); mantendo a primeira ocorrência",
                name,
                duplicates
            );
        }

        Self { rows, positions }
    }

    pub fn get(&self, key: &str) -> Option<&D> {
        self.positions.get(key).map(|&pos| &self.rows[pos])
    }

    pub fn rows(&self) -> &[D] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Uma linha do resultado do join: a linha fato mais a linha dimensão casada.
///
/// Quando os dois lados têm um campo com o mesmo nome (ex: `name`), quem lê o
/// resultado usa o da dimensão; as chaves do join são iguais dos dois lados.
#[derive(Debug, Clone, Copy)]
pub struct Joined<'a, F, D> {
    pub fact: &'a F,
    pub dim: &'a D,
}

/// Inner equi-join entre a tabela fato e uma dimensão indexada.
///
/// Linhas fato sem correspondência na dimensão são descartadas em silêncio:
/// é a política do painel (inner join), não um erro. O custo é O(F) sobre um
/// índice já montado.
pub fn inner_join<'a, F, D, I, K>(
    facts: I,
    dimension: &'a DimensionTable<D>,
    fact_key: K,
) -> Vec<Joined<'a, F, D>>
where
    F: 'a,
    D: Dimension,
    I: IntoIterator<Item = &'a F>,
    K: Fn(&F) -> &str,
{
    let mut dropped = 0usize;

    let joined: Vec<Joined<'a, F, D>> = facts
        .into_iter()
        .filter_map(|fact| match dimension.get(fact_key(fact)) {
            Some(dim) => Some(Joined { fact, dim }),
            None => {
                dropped += 1;
                None
            }
        })
        .collect();

    if dropped > 0 {
        tracing::debug!("Join descartou {} linha(s) sem referência na dimensão", dropped);
    }

    joined
}
