// ==========================================
// 赛事管理系统 - 实体字段表
// ==========================================
// 职责: 球员 / 餐食登记 / 委员会成员的列名关键字与映射规则
// 说明: 关键字按优先级排列，最具体的写在最前
// ==========================================

use crate::domain::record::{
    CanonicalRecord, CommitteeMemberRecord, FoodRegistrationRecord, PlayerRecord, RawRow,
};
use crate::domain::types::EntityKind;
use crate::importer::column_resolver::FieldSpec;
use crate::importer::field_normalizer::{
    classify_dietary, classify_experience, classify_gender, classify_position,
    derive_trainee_id, normalize_dietary, normalize_experience, normalize_gender,
    normalize_position,
};
use crate::importer::importer_trait::{EntitySchema, MappingContext};
use tracing::warn;

// ==========================================
// 通用字段（三种实体共用）
// ==========================================
pub const FULL_NAME: FieldSpec = FieldSpec::new(
    "fullName",
    &["Full Name", "fullName", "Participant Name", "Name"],
);
pub const EMAIL: FieldSpec = FieldSpec::new(
    "email",
    &["Email Address", "email", "Email", "E-mail", "Mail"],
);
pub const TRAINEE_ID: FieldSpec = FieldSpec::new(
    "traineeId",
    &["Trainee ID", "traineeId", "Employee ID", "Trainee Number", "Trainee No", "Emp ID"],
);
pub const PHONE: FieldSpec = FieldSpec::new(
    "phone",
    &["Phone Number", "phone", "Mobile", "Contact", "Phone"],
);
pub const GENDER: FieldSpec = FieldSpec::new("gender", &["Gender", "gender", "Sex"]);
pub const DEPARTMENT: FieldSpec = FieldSpec::new(
    "department",
    &["Department", "department", "Dept", "Team", "Batch"],
);

// ==========================================
// 球员专用字段
// ==========================================
pub const PLAYING_POSITION: FieldSpec = FieldSpec::new(
    "playingPosition",
    &["Playing Position", "playingPosition", "Position", "Role", "Skill"],
);
pub const EXPERIENCE_LEVEL: FieldSpec = FieldSpec::new(
    "experienceLevel",
    &["Experience Level", "experienceLevel", "Experience", "Level"],
);

// ==========================================
// 餐食登记专用字段
// ==========================================
pub const DIETARY_PREFERENCE: FieldSpec = FieldSpec::new(
    "dietaryPreference",
    &["Dietary Preference", "dietaryPreference", "Food Preference", "Diet", "Food", "Meal"],
);
pub const SPECIAL_REQUIREMENTS: FieldSpec = FieldSpec::new(
    "specialRequirements",
    &["Special Requirements", "specialRequirements", "Allergies", "Remarks", "Notes"],
);

// ==========================================
// 委员会专用字段
// ==========================================
pub const COMMITTEE_ROLE: FieldSpec = FieldSpec::new(
    "role",
    &["Committee Role", "role", "Designation", "Role", "Position"],
);

const PLAYER_FIELDS: &[FieldSpec] = &[
    FULL_NAME,
    EMAIL,
    TRAINEE_ID,
    PHONE,
    GENDER,
    PLAYING_POSITION,
    EXPERIENCE_LEVEL,
    DEPARTMENT,
];

const FOOD_FIELDS: &[FieldSpec] = &[
    FULL_NAME,
    EMAIL,
    TRAINEE_ID,
    PHONE,
    GENDER,
    DIETARY_PREFERENCE,
    SPECIAL_REQUIREMENTS,
];

const COMMITTEE_FIELDS: &[FieldSpec] = &[
    FULL_NAME,
    EMAIL,
    TRAINEE_ID,
    PHONE,
    COMMITTEE_ROLE,
    DEPARTMENT,
];

// ==========================================
// 标识字段
// ==========================================
struct Identity {
    full_name: String,
    email: String,
    trainee_id: String,
}

impl Identity {
    fn resolve(row: &RawRow) -> Self {
        Self {
            full_name: FULL_NAME.resolve(row),
            email: EMAIL.resolve(row),
            trainee_id: TRAINEE_ID.resolve(row),
        }
    }

    /// 解析后三项均为空 → 空白行
    fn is_blank(&self) -> bool {
        self.full_name.is_empty() && self.email.is_empty() && self.trainee_id.is_empty()
    }
}

/// 非空但未识别的值回退到默认值时记录日志
fn note_fallback<T>(row: &RawRow, field: &str, raw: &str, recognized: Option<T>) {
    if recognized.is_none() && !raw.is_empty() {
        warn!(
            row_number = row.row_number(),
            field = field,
            value = raw,
            "无法识别的取值，已使用默认值"
        );
    }
}

// ==========================================
// PlayerSchema
// ==========================================
pub struct PlayerSchema;

impl EntitySchema for PlayerSchema {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        PLAYER_FIELDS
    }

    fn map_row(&self, row: &RawRow, ctx: &MappingContext) -> Option<CanonicalRecord> {
        let identity = Identity::resolve(row);
        if identity.is_blank() {
            return None;
        }

        let gender = GENDER.resolve(row);
        let position = PLAYING_POSITION.resolve(row);
        let experience = EXPERIENCE_LEVEL.resolve(row);
        note_fallback(row, GENDER.target, &gender, classify_gender(&gender));
        note_fallback(row, PLAYING_POSITION.target, &position, classify_position(&position));
        note_fallback(
            row,
            EXPERIENCE_LEVEL.target,
            &experience,
            classify_experience(&experience),
        );

        // 学员编号为空时由邮箱派生或生成兜底编号
        let trainee_id = if identity.trainee_id.is_empty() {
            derive_trainee_id(&identity.email, ctx.started_at, row.row_number())
        } else {
            identity.trainee_id
        };

        Some(CanonicalRecord::Player(PlayerRecord {
            full_name: identity.full_name,
            email: identity.email,
            trainee_id,
            phone: PHONE.resolve(row),
            gender: normalize_gender(&gender),
            playing_position: normalize_position(&position),
            experience_level: normalize_experience(&experience),
            department: DEPARTMENT.resolve(row),
            row_number: row.row_number(),
        }))
    }
}

// ==========================================
// FoodRegistrationSchema
// ==========================================
pub struct FoodRegistrationSchema;

impl EntitySchema for FoodRegistrationSchema {
    fn kind(&self) -> EntityKind {
        EntityKind::FoodRegistration
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        FOOD_FIELDS
    }

    fn map_row(&self, row: &RawRow, _ctx: &MappingContext) -> Option<CanonicalRecord> {
        let identity = Identity::resolve(row);
        if identity.is_blank() {
            return None;
        }

        let gender = GENDER.resolve(row);
        let dietary = DIETARY_PREFERENCE.resolve(row);
        note_fallback(row, GENDER.target, &gender, classify_gender(&gender));
        note_fallback(row, DIETARY_PREFERENCE.target, &dietary, classify_dietary(&dietary));

        Some(CanonicalRecord::FoodRegistration(FoodRegistrationRecord {
            full_name: identity.full_name,
            email: identity.email,
            trainee_id: identity.trainee_id,
            phone: PHONE.resolve(row),
            gender: normalize_gender(&gender),
            dietary_preference: normalize_dietary(&dietary),
            special_requirements: SPECIAL_REQUIREMENTS.resolve(row),
            row_number: row.row_number(),
        }))
    }
}

// ==========================================
// CommitteeMemberSchema
// ==========================================
pub struct CommitteeMemberSchema;

impl EntitySchema for CommitteeMemberSchema {
    fn kind(&self) -> EntityKind {
        EntityKind::CommitteeMember
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        COMMITTEE_FIELDS
    }

    fn map_row(&self, row: &RawRow, _ctx: &MappingContext) -> Option<CanonicalRecord> {
        let identity = Identity::resolve(row);
        if identity.is_blank() {
            return None;
        }

        Some(CanonicalRecord::CommitteeMember(CommitteeMemberRecord {
            full_name: identity.full_name,
            email: identity.email,
            trainee_id: identity.trainee_id,
            phone: PHONE.resolve(row),
            role: COMMITTEE_ROLE.resolve(row),
            department: DEPARTMENT.resolve(row),
            row_number: row.row_number(),
        }))
    }
}

/// 按实体种类取字段表
pub fn schema_for(kind: EntityKind) -> Box<dyn EntitySchema> {
    match kind {
        EntityKind::Player => Box::new(PlayerSchema),
        EntityKind::FoodRegistration => Box::new(FoodRegistrationSchema),
        EntityKind::CommitteeMember => Box::new(CommitteeMemberSchema),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{DietaryPreference, ExperienceLevel, Gender, PlayingPosition};
    use chrono::{TimeZone, Utc};

    fn ctx() -> MappingContext {
        MappingContext::new(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
    }

    fn row(row_number: usize, cells: &[(&str, &str)]) -> RawRow {
        RawRow::new(
            row_number,
            cells
                .iter()
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_player_schema_full_row() {
        let r = row(
            2,
            &[
                ("Full Name", "Jane Doe"),
                ("Email Address", "jane@x.com"),
                ("Trainee ID", "TRN007"),
                ("Gender", "F"),
                ("Playing Position", "Wicket Keeper"),
                ("Experience Level", "Advanced"),
            ],
        );

        let Some(CanonicalRecord::Player(player)) = PlayerSchema.map_row(&r, &ctx()) else {
            panic!("应映射为球员记录");
        };

        assert_eq!(player.full_name, "Jane Doe");
        assert_eq!(player.email, "jane@x.com");
        assert_eq!(player.trainee_id, "TRN007");
        assert_eq!(player.gender, Gender::Female);
        assert_eq!(player.playing_position, PlayingPosition::WicketKeeper);
        assert_eq!(player.experience_level, ExperienceLevel::Advanced);
        assert_eq!(player.row_number, 2);
    }

    #[test]
    fn test_player_trainee_id_derived_from_email() {
        let r = row(5, &[("Name", "Ben"), ("E-mail", "ben.s@club.org")]);

        let Some(CanonicalRecord::Player(player)) = PlayerSchema.map_row(&r, &ctx()) else {
            panic!("应映射为球员记录");
        };

        assert_eq!(player.trainee_id, "BENS");
    }

    #[test]
    fn test_trainee_name_column_is_not_a_trainee_id() {
        let r = row(2, &[("Trainee Name", "Jane Doe"), ("Email", "jane@x.com")]);

        let Some(CanonicalRecord::Player(player)) = PlayerSchema.map_row(&r, &ctx()) else {
            panic!("应映射为球员记录");
        };

        assert_eq!(player.full_name, "Jane Doe");
        assert_eq!(player.trainee_id, "JANE");
    }

    #[test]
    fn test_trainee_number_column_is_a_trainee_id() {
        let r = row(2, &[("Name", "Jane Doe"), ("Trainee No.", "T-042")]);

        let Some(CanonicalRecord::Player(player)) = PlayerSchema.map_row(&r, &ctx()) else {
            panic!("应映射为球员记录");
        };

        assert_eq!(player.trainee_id, "T-042");
    }

    #[test]
    fn test_blank_identity_is_dropped_for_every_schema() {
        let r = row(9, &[("Full Name", "  "), ("Gender", "Male"), ("Diet", "veg")]);

        for kind in [
            EntityKind::Player,
            EntityKind::FoodRegistration,
            EntityKind::CommitteeMember,
        ] {
            assert!(schema_for(kind).map_row(&r, &ctx()).is_none(), "{}", kind);
        }
    }

    #[test]
    fn test_food_schema_normalizes_diet() {
        let r = row(
            3,
            &[
                ("Participant Name", "Asha"),
                ("Food Preference", "Non-veg (chicken)"),
                ("Allergies", "Peanuts"),
            ],
        );

        let Some(CanonicalRecord::FoodRegistration(reg)) =
            FoodRegistrationSchema.map_row(&r, &ctx())
        else {
            panic!("应映射为餐食登记");
        };

        assert_eq!(reg.full_name, "Asha");
        assert_eq!(reg.dietary_preference, DietaryPreference::NonVegetarian);
        assert_eq!(reg.special_requirements, "Peanuts");
        assert_eq!(reg.trainee_id, "");
    }

    #[test]
    fn test_committee_schema_email_only_row_kept() {
        let r = row(4, &[("Email", "sec@club.org"), ("Designation", "Secretary")]);

        let Some(CanonicalRecord::CommitteeMember(member)) =
            CommitteeMemberSchema.map_row(&r, &ctx())
        else {
            panic!("应映射为委员会成员");
        };

        assert_eq!(member.email, "sec@club.org");
        assert_eq!(member.role, "Secretary");
        assert_eq!(member.full_name, "");
    }

    #[test]
    fn test_field_specs_start_with_identity_fields() {
        for kind in [
            EntityKind::Player,
            EntityKind::FoodRegistration,
            EntityKind::CommitteeMember,
        ] {
            let schema = schema_for(kind);
            assert_eq!(schema.kind(), kind);
            let targets: Vec<&str> = schema.field_specs().iter().map(|f| f.target).collect();
            assert_eq!(&targets[..3], &["fullName", "email", "traineeId"]);
        }
    }
}
