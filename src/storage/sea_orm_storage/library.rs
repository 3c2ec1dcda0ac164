//! 图书与借阅存储操作

use chrono::{Duration, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::{SeaOrmStorage, db_err, fetch_page, now_ts};
use crate::entity::book_loans::{self, Entity as BookLoans};
use crate::entity::books::{self, Entity as Books};
use crate::entity::stored_date;
use crate::errors::{ErpError, Result};
use crate::models::{
    PaginatedResponse,
    common::normalize_page,
    library::{
        Book, BookListParams, BookLoan, CreateBookRequest, IssueBookRequest, LoanListQuery,
        LoanPolicy, LoanStatus, UpdateBookRequest, normalize_isbn, overdue_fine,
    },
    students::entities::StudentStatus,
};
use crate::utils::dates::format_date;
use crate::utils::escape_like_pattern;
use crate::utils::validate::validate_isbn;

impl SeaOrmStorage {
    pub async fn create_book_impl(&self, req: CreateBookRequest) -> Result<Book> {
        req.validate().map_err(ErpError::validation)?;

        let now = now_ts();
        let model = books::ActiveModel {
            title: Set(req.title.trim().to_string()),
            author: Set(req.author.trim().to_string()),
            isbn: Set(normalize_isbn(&req.isbn)),
            category: Set(req.category),
            total_copies: Set(req.total_copies),
            available_copies: Set(req.total_copies),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create book"))?;

        Ok(result.into_book())
    }

    pub async fn get_book_by_id_impl(&self, id: i64) -> Result<Option<Book>> {
        let result = Books::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query book"))?;

        Ok(result.map(|m| m.into_book()))
    }

    pub async fn list_books_impl(&self, params: BookListParams) -> Result<PaginatedResponse<Book>> {
        let mut select = Books::find();

        if let Some(ref category) = params.category {
            select = select.filter(books::Column::Category.eq(category.trim()));
        }
        if params.available_only.unwrap_or(false) {
            select = select.filter(books::Column::AvailableCopies.gt(0));
        }
        if let Some(ref search) = params.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(books::Column::Title.contains(&escaped))
                    .add(books::Column::Author.contains(&escaped))
                    .add(books::Column::Isbn.contains(normalize_isbn(&escaped))),
            );
        }

        select = select.order_by_asc(books::Column::Title);

        fetch_page(
            &self.db,
            select,
            params.pagination.bounds(),
            "Failed to list books",
            |m| m.into_book(),
        )
        .await
    }

    /// 修改馆藏数量时按已借出数量调整可借数量
    pub async fn update_book_impl(&self, id: i64, update: UpdateBookRequest) -> Result<Option<Book>> {
        let Some(existing) = self.get_book_by_id_impl(id).await? else {
            return Ok(None);
        };

        let mut model = books::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(author) = update.author {
            model.author = Set(author.trim().to_string());
        }
        if let Some(isbn) = update.isbn {
            validate_isbn(&isbn).map_err(ErpError::validation)?;
            model.isbn = Set(normalize_isbn(&isbn));
        }
        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }
        if let Some(total) = update.total_copies {
            let issued = existing.total_copies - existing.available_copies;
            if total < 1 || total < issued {
                return Err(ErpError::validation(format!(
                    "total_copies must be at least {} ({issued} copies are issued)",
                    issued.max(1)
                )));
            }
            model.total_copies = Set(total);
            model.available_copies = Set(total - issued);
        }

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update book"))?;

        self.get_book_by_id_impl(id).await
    }

    pub async fn delete_book_impl(&self, id: i64) -> Result<bool> {
        let result = Books::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete book"))?;

        Ok(result.rows_affected > 0)
    }

    /// 借书：可借数量减一，同一事务内写入借阅记录
    pub async fn issue_book_impl(
        &self,
        req: IssueBookRequest,
        policy: LoanPolicy,
        issued_by: Option<i64>,
        today: NaiveDate,
    ) -> Result<BookLoan> {
        let student = self
            .get_student_by_id_impl(req.student_id)
            .await?
            .ok_or_else(|| ErpError::not_found(format!("Student {} not found", req.student_id)))?;
        if student.status != StudentStatus::Active {
            return Err(ErpError::validation(format!(
                "Student {} is not active",
                student.id
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin loan transaction"))?;

        let book = Books::find_by_id(req.book_id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query book"))?
            .ok_or_else(|| ErpError::not_found(format!("Book {} not found", req.book_id)))?;
        if book.available_copies < 1 {
            return Err(ErpError::validation(format!(
                "No copies of '{}' are available",
                book.title
            )));
        }

        let active = BookLoans::find()
            .filter(book_loans::Column::StudentId.eq(req.student_id))
            .filter(book_loans::Column::ReturnDate.is_null())
            .count(&txn)
            .await
            .map_err(db_err("Failed to count active loans"))?;
        if active >= policy.max_active_loans {
            return Err(ErpError::validation(format!(
                "Student already has {active} active loans (limit {})",
                policy.max_active_loans
            )));
        }

        let now = now_ts();
        books::ActiveModel {
            id: Set(book.id),
            available_copies: Set(book.available_copies - 1),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(db_err("Failed to update book availability"))?;

        let issue_date = req.issue_date.unwrap_or(today);
        let loan = book_loans::ActiveModel {
            book_id: Set(book.id),
            student_id: Set(req.student_id),
            issue_date: Set(format_date(issue_date)),
            due_date: Set(format_date(issue_date + Duration::days(policy.loan_days))),
            return_date: Set(None),
            fine_amount: Set(0.0),
            status: Set(LoanStatus::Issued.to_string()),
            issued_by: Set(issued_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("Failed to create loan"))?;

        txn.commit()
            .await
            .map_err(db_err("Failed to commit loan"))?;

        Ok(loan.into_loan(today))
    }

    /// 还书：计算逾期罚金，可借数量加一
    pub async fn return_book_impl(
        &self,
        loan_id: i64,
        return_date: NaiveDate,
        policy: LoanPolicy,
        today: NaiveDate,
    ) -> Result<Option<BookLoan>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_err("Failed to begin return transaction"))?;

        let Some(loan) = BookLoans::find_by_id(loan_id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query loan"))?
        else {
            return Ok(None);
        };
        if loan.return_date.is_some() {
            return Err(ErpError::validation("Book has already been returned"));
        }

        let issue_date = stored_date(&loan.issue_date);
        if return_date < issue_date {
            return Err(ErpError::validation(
                "return_date cannot be before the issue date",
            ));
        }
        let fine = overdue_fine(stored_date(&loan.due_date), return_date, policy.fine_per_day);

        let now = now_ts();
        let updated = book_loans::ActiveModel {
            id: Set(loan.id),
            return_date: Set(Some(format_date(return_date))),
            fine_amount: Set(fine),
            status: Set(LoanStatus::Returned.to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(db_err("Failed to update loan"))?;

        if let Some(book) = Books::find_by_id(loan.book_id)
            .one(&txn)
            .await
            .map_err(db_err("Failed to query book"))?
        {
            books::ActiveModel {
                id: Set(book.id),
                available_copies: Set((book.available_copies + 1).min(book.total_copies)),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(db_err("Failed to update book availability"))?;
        }

        txn.commit()
            .await
            .map_err(db_err("Failed to commit return"))?;

        Ok(Some(updated.into_loan(today)))
    }

    pub async fn get_loan_by_id_impl(&self, id: i64, today: NaiveDate) -> Result<Option<BookLoan>> {
        let result = BookLoans::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query loan"))?;

        Ok(result.map(|m| m.into_loan(today)))
    }

    pub async fn list_loans_impl(
        &self,
        query: LoanListQuery,
        today: NaiveDate,
    ) -> Result<PaginatedResponse<BookLoan>> {
        let mut select = BookLoans::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(book_loans::Column::StudentId.eq(student_id));
        }
        if let Some(book_id) = query.book_id {
            select = select.filter(book_loans::Column::BookId.eq(book_id));
        }
        if query.open_only {
            select = select.filter(book_loans::Column::ReturnDate.is_null());
        }
        if let Some(ref ids) = query.student_ids {
            select = select.filter(book_loans::Column::StudentId.is_in(ids.clone()));
        }

        select = select
            .order_by_desc(book_loans::Column::IssueDate)
            .order_by_desc(book_loans::Column::Id);

        fetch_page(
            &self.db,
            select,
            normalize_page(query.page, query.size),
            "Failed to list loans",
            |m| m.into_loan(today),
        )
        .await
    }
}
