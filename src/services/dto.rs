use common::{CategoryDto, ExpenseDto, IncomeDto, ReportDto};
use model::entities::{category, expense, monthly_income, report};

/// Conversion of store rows into their transport shape.
pub trait IntoDto {
    type Dto;

    fn into_dto(self) -> Self::Dto;
}

impl<T: IntoDto> IntoDto for Vec<T> {
    type Dto = Vec<T::Dto>;

    fn into_dto(self) -> Self::Dto {
        self.into_iter().map(IntoDto::into_dto).collect()
    }
}

impl<T: IntoDto> IntoDto for Option<T> {
    type Dto = Option<T::Dto>;

    fn into_dto(self) -> Self::Dto {
        self.map(IntoDto::into_dto)
    }
}

impl IntoDto for category::Model {
    type Dto = CategoryDto;

    fn into_dto(self) -> CategoryDto {
        CategoryDto {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            icon: self.icon,
            color: self.color,
            created_at: self.created_at,
        }
    }
}

impl IntoDto for monthly_income::Model {
    type Dto = IncomeDto;

    fn into_dto(self) -> IncomeDto {
        IncomeDto {
            id: self.id,
            user_id: self.user_id,
            year: self.year,
            month: self.month,
            amount: self.amount,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl IntoDto for expense::Model {
    type Dto = ExpenseDto;

    fn into_dto(self) -> ExpenseDto {
        ExpenseDto {
            id: self.id,
            user_id: self.user_id,
            category_id: self.category_id,
            year: self.year,
            month: self.month,
            group_id: self.group_id,
            paid: self.paid,
            expense_type: expense_type_dto(self.expense_type),
            description: self.description,
            amount: self.amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl IntoDto for report::Model {
    type Dto = ReportDto;

    fn into_dto(self) -> ReportDto {
        ReportDto {
            id: self.id,
            user_id: self.user_id,
            year: self.year,
            month: self.month,
            file_url: self.file_url,
            file_key: self.file_key,
            created_at: self.created_at,
        }
    }
}

pub fn expense_type_dto(kind: expense::ExpenseType) -> common::ExpenseType {
    match kind {
        expense::ExpenseType::Fixed => common::ExpenseType::Fixed,
        expense::ExpenseType::Variable => common::ExpenseType::Variable,
    }
}

pub fn expense_type_model(kind: common::ExpenseType) -> expense::ExpenseType {
    match kind {
        common::ExpenseType::Fixed => expense::ExpenseType::Fixed,
        common::ExpenseType::Variable => expense::ExpenseType::Variable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    #[test]
    fn test_expense_row_to_dto() {
        let now = Utc::now();
        let row = expense::Model {
            id: 4,
            user_id: 1,
            category_id: 2,
            year: 2025,
            month: 7,
            group_id: Some("grp_1".to_string()),
            paid: true,
            expense_type: expense::ExpenseType::Fixed,
            description: "Internet".to_string(),
            amount: Decimal::new(4999, 2),
            created_at: now,
            updated_at: now,
        };

        let dto = row.into_dto();
        assert_eq!(dto.expense_type, common::ExpenseType::Fixed);
        assert_eq!(dto.group_id.as_deref(), Some("grp_1"));
        assert_eq!(dto.amount, Decimal::new(4999, 2));
    }

    #[test]
    fn test_type_mapping_round_trips() {
        for kind in [common::ExpenseType::Fixed, common::ExpenseType::Variable] {
            assert_eq!(expense_type_dto(expense_type_model(kind)), kind);
        }
    }
}
