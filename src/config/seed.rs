//! 개발용 샘플 데이터
//!
//! users 테이블이 비어 있을 때만 적재합니다.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set, TransactionTrait};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::checklist::entity::checklist_item::{self, ItemType};
use crate::domain::checklist::entity::checklist_master;
use crate::domain::counselor::entity::counselor;
use crate::domain::notice::entity::notice::{self, NoticeStatus, NoticeType};
use crate::domain::user::entity::user;
use crate::utils::password::hash_password;

const SEED_ADMIN_EMAIL: &str = "admin@suwon-healing.com";
const SEED_ADMIN_PASSWORD: &str = "admin12345";

struct SeedCounselor {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    specialization: &'static str,
    experience: &'static str,
    bio: &'static str,
}

const SEED_COUNSELORS: &[SeedCounselor] = &[
    SeedCounselor {
        name: "김상담",
        email: "counselor1@suwon-healing.com",
        phone: "010-1000-1000",
        specialization: "개인상담",
        experience: "10년",
        bio: "다양한 심리적 어려움을 겪는 분들과 함께합니다.",
    },
    SeedCounselor {
        name: "이치유",
        email: "counselor2@suwon-healing.com",
        phone: "010-2000-2000",
        specialization: "부부상담",
        experience: "8년",
        bio: "부부 간 소통 문제와 갈등 해결을 돕습니다.",
    },
    SeedCounselor {
        name: "박가족",
        email: "counselor3@suwon-healing.com",
        phone: "010-3000-3000",
        specialization: "가족상담",
        experience: "12년",
        bio: "가족 구성원 간의 이해와 소통을 돕습니다.",
    },
];

const SEED_CHECKLIST_QUESTIONS: &[(&str, ItemType)] = &[
    ("최근 2주간 잠들기 어려운 날이 많았습니까?", ItemType::Checkbox),
    ("현재 스트레스 정도를 선택해 주세요.", ItemType::Scale),
    ("스트레스의 주된 원인은 무엇입니까?", ItemType::Radio),
    ("상담사에게 전하고 싶은 말을 적어 주세요.", ItemType::Text),
];

pub async fn seed_sample_data(db: &DatabaseConnection, bcrypt_cost: u32) -> Result<(), DbErr> {
    if user::Entity::find().count(db).await? > 0 {
        info!("Skipping sample data seeding (users table is not empty).");
        return Ok(());
    }

    let hashed_password = hash_password(SEED_ADMIN_PASSWORD, bcrypt_cost)
        .map_err(|e| DbErr::Custom(e.to_string()))?;
    let now = Utc::now().naive_utc();

    let txn = db.begin().await?;

    let admin = user::ActiveModel {
        email: Set(SEED_ADMIN_EMAIL.to_string()),
        hashed_password: Set(hashed_password),
        name: Set("관리자".to_string()),
        phone: Set(Some("010-1234-5678".to_string())),
        is_active: Set(true),
        is_admin: Set(true),
        is_counselor: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for seed in SEED_COUNSELORS {
        counselor::ActiveModel {
            name: Set(seed.name.to_string()),
            email: Set(seed.email.to_string()),
            phone: Set(Some(seed.phone.to_string())),
            specialization: Set(Some(seed.specialization.to_string())),
            experience: Set(Some(seed.experience.to_string())),
            bio: Set(Some(seed.bio.to_string())),
            is_online: Set(true),
            is_active: Set(true),
            rating: Set(0.0),
            total_reviews: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    notice::ActiveModel {
        author_id: Set(Some(admin.id)),
        title: Set("상담센터 운영시간 안내".to_string()),
        content: Set("평일: 09:00-18:00\n토요일: 09:00-14:00\n일요일: 휴무".to_string()),
        notice_type: Set(NoticeType::General),
        status: Set(NoticeStatus::Published),
        is_pinned: Set(true),
        is_active: Set(true),
        view_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let master = checklist_master::ActiveModel {
        name: Set("스트레스 자가진단".to_string()),
        description: Set(Some("상담 전 현재 상태를 점검합니다.".to_string())),
        category: Set(Some("스트레스".to_string())),
        version: Set("1.0".to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (index, (question, item_type)) in SEED_CHECKLIST_QUESTIONS.iter().enumerate() {
        let options = match item_type {
            ItemType::Radio => Some(json!(["직장", "가정", "대인관계", "기타"])),
            _ => None,
        };
        checklist_item::ActiveModel {
            master_id: Set(master.id),
            question: Set(question.to_string()),
            item_type: Set(*item_type),
            options: Set(options),
            required: Set(!matches!(item_type, ItemType::Text)),
            order_index: Set(index as i32 + 1),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    warn!(
        email = SEED_ADMIN_EMAIL,
        "Sample data seeded with a default admin password. Change it before exposing the server."
    );
    Ok(())
}
