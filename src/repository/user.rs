use diesel::prelude::*;

use crate::domain::types::UserId;
use crate::domain::user::{NewUser, User};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::{DieselRepository, RepositoryResult, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .find(id.get())
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(TryInto::try_into).transpose()?)
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::email.eq(email))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(TryInto::try_into).transpose()?)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let row: DbUser = diesel::insert_into(users::table)
            .values(DbNewUser::from(user))
            .get_result(&mut conn)?;

        Ok(User::try_from(row)?)
    }
}
