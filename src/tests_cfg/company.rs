use crate::{Column, FromObject, ManyToOne, Mapper, MapperErr, Object, OneToMany};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub employees: Vec<Employee>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub company_id: Option<i32>,
}

pub fn company_mapper() -> Mapper {
    Mapper::new("Company", "company")
        .with_column(Column::new("id", "id"))
        .with_column(Column::new("name", "name"))
        .with_one_to_many(OneToMany::new("employees", "Employee", "company_id"))
}

pub fn employee_mapper() -> Mapper {
    Mapper::new("Employee", "employee")
        .with_column(Column::new("id", "id"))
        .with_column(Column::new("name", "name"))
        .with_column(Column::new("companyId", "company_id"))
        .with_many_to_one(ManyToOne::new("company", "Company", "company_id"))
}

impl FromObject for Company {
    fn from_object(object: &Object) -> Result<Self, MapperErr> {
        Ok(Self {
            id: object.try_get("id")?,
            name: object.try_get("name")?,
            employees: object
                .many("employees")
                .iter()
                .map(Employee::from_object)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl FromObject for Employee {
    fn from_object(object: &Object) -> Result<Self, MapperErr> {
        Ok(Self {
            id: object.try_get("id")?,
            name: object.try_get("name")?,
            company_id: object.try_get("companyId")?,
        })
    }
}
