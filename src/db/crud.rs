// src/db/crud.rs
//
// Consultas que todas as tabelas compartilham (listar, buscar, atualizar e
// apagar por id). INSERTs ficam em cada repositório, com a lista de colunas
// explícita.

use sqlx::{
    postgres::PgRow, query_builder::Separated, Encode, FromRow, PgPool, Postgres, QueryBuilder,
    Type,
};

use crate::common::{
    db_utils::{map_delete_error, map_write_error},
    error::AppError,
    pagination::Page,
};

/// Liga um tipo de linha à sua tabela.
pub trait Table {
    const TABLE: &'static str;
    /// Mensagem do 404 quando o id não existe.
    const NOT_FOUND: &'static str;
}

/// Lista de colunas que um payload de atualização pode alterar.
pub trait PatchSet {
    fn assign<'qb, 'args: 'qb>(&self, set: &mut Assignments<'qb, 'args>);
}

/// Acumula `coluna = $n` dentro do SET de um UPDATE.
pub struct Assignments<'qb, 'args: 'qb> {
    set: Separated<'qb, 'args, Postgres, &'static str>,
    count: usize,
}

impl<'qb, 'args: 'qb> Assignments<'qb, 'args> {
    /// Só entra no SET quando o campo veio no JSON.
    pub fn set<T>(&mut self, column: &'static str, value: Option<&T>) -> &mut Self
    where
        T: Clone + Send + 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        if let Some(value) = value {
            self.set
                .push(column)
                .push_unseparated(" = ")
                .push_bind_unseparated(value.clone());
            self.count += 1;
        }
        self
    }
}

pub async fn fetch_page<T>(
    pool: &PgPool,
    page: Page,
    scope: Option<(&'static str, i64)>,
) -> Result<Vec<T>, AppError>
where
    T: Table + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT * FROM {}", T::TABLE));
    if let Some((column, value)) = scope {
        qb.push(" WHERE ").push(column).push(" = ").push_bind(value);
    }
    push_window(&mut qb, page);

    let rows = qb.build_query_as::<T>().fetch_all(pool).await?;
    Ok(rows)
}

/// Fecha a consulta de listagem: ordem de inserção + janela.
pub fn push_window(qb: &mut QueryBuilder<'_, Postgres>, page: Page) {
    qb.push(" ORDER BY id ASC OFFSET ")
        .push_bind(page.offset)
        .push(" LIMIT ")
        .push_bind(page.limit);
}

pub async fn fetch_one<T>(pool: &PgPool, id: i64) -> Result<T, AppError>
where
    T: Table + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE);
    sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound(T::NOT_FOUND))
}

pub async fn exists<T: Table>(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", T::TABLE);
    let found = sqlx::query_scalar::<_, bool>(&sql)
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found)
}

/// Falha com 404 quando o registro pai não existe.
pub async fn ensure_exists<T: Table>(pool: &PgPool, id: i64) -> Result<(), AppError> {
    if exists::<T>(pool, id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(T::NOT_FOUND))
    }
}

/// UPDATE só com as colunas presentes no patch. Patch vazio devolve a linha atual.
pub async fn update<T, P>(pool: &PgPool, id: i64, patch: &P) -> Result<T, AppError>
where
    T: Table + for<'r> FromRow<'r, PgRow> + Send + Unpin,
    P: PatchSet + ?Sized,
{
    let mut qb = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", T::TABLE));
    let changed = {
        let mut assignments = Assignments {
            set: qb.separated(", "),
            count: 0,
        };
        patch.assign(&mut assignments);
        if assignments.count > 0 {
            assignments.set.push("updated_at = NOW()");
        }
        assignments.count
    };

    if changed == 0 {
        return fetch_one::<T>(pool, id).await;
    }

    qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

    qb.build_query_as::<T>()
        .fetch_optional(pool)
        .await
        .map_err(map_write_error)?
        .ok_or(AppError::NotFound(T::NOT_FOUND))
}

/// DELETE por id; `scope` restringe a um registro pai (ex: imagem de um veículo).
pub async fn delete<T: Table>(
    pool: &PgPool,
    id: i64,
    scope: Option<(&'static str, i64)>,
) -> Result<(), AppError> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("DELETE FROM {} WHERE id = ", T::TABLE));
    qb.push_bind(id);
    if let Some((column, value)) = scope {
        qb.push(" AND ").push(column).push(" = ").push_bind(value);
    }

    let result = qb.build().execute(pool).await.map_err(map_delete_error)?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(T::NOT_FOUND));
    }
    Ok(())
}
