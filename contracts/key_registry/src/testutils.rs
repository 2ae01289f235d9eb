//! Full KEY deployment for tests: all four contracts wired together the way
//! a real deployment is.

extern crate std;

use certificate_sbt::{CertificateSbt, CertificateSbtClient};
use identity_registry::{
    BeneficiaryProfile, IdentityRegistry, IdentityRegistryClient, OngProfile, ProfessorProfile,
};
use key_common::Role;
use project_registry::{ActivityKind, ProjectRegistry, ProjectRegistryClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, BytesN, Env, String,
};

use crate::{DeviceInfo, EvidencePackage, EvidenceStatus, GeoPoint, KeyRegistry, KeyRegistryClient};

/// 0.01 XLM in stroops.
pub const FEE: i128 = 100_000;
pub const T: u64 = 1_700_000_000;
pub const DAY: u64 = 86_400;

pub struct Protocol {
    pub env: Env,
    pub admin: Address,
    pub tee: Address,
    pub token: Address,
    pub identity: IdentityRegistryClient<'static>,
    pub projects: ProjectRegistryClient<'static>,
    pub key: KeyRegistryClient<'static>,
    pub sbt: CertificateSbtClient<'static>,
}

/// An onboarded ONG with a project and an assigned professor.
pub struct Staffed {
    pub ong: Address,
    pub professor: Address,
    pub beneficiary: Address,
    pub project_id: u64,
}

impl Protocol {
    pub fn deploy() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().with_mut(|li| li.timestamp = T);

        let admin = Address::generate(&env);
        let tee = Address::generate(&env);
        let sac = env.register_stellar_asset_contract_v2(admin.clone());

        let identity_id = env.register(IdentityRegistry, ());
        let project_id = env.register(ProjectRegistry, ());
        let key_id = env.register(KeyRegistry, ());
        let sbt_id = env.register(CertificateSbt, ());

        let identity = IdentityRegistryClient::new(&env, &identity_id);
        let projects = ProjectRegistryClient::new(&env, &project_id);
        let key = KeyRegistryClient::new(&env, &key_id);
        let sbt = CertificateSbtClient::new(&env, &sbt_id);

        identity.initialize(&admin, &admin, &sac.address(), &FEE);
        projects.initialize(&admin, &identity_id);
        key.initialize(&admin, &identity_id, &project_id);
        sbt.initialize(&admin);

        projects.set_key_registry(&admin, &key_id);
        key.set_phala_tee(&admin, &tee);
        key.set_certificate_sbt(&admin, &sbt_id);
        sbt.grant_role(&admin, &key_id, &Role::Issuer);

        Protocol {
            env,
            admin,
            tee,
            token: sac.address(),
            identity,
            projects,
            key,
            sbt,
        }
    }

    pub fn hash(&self, byte: u8) -> BytesN<32> {
        BytesN::from_array(&self.env, &[byte; 32])
    }

    /// Request, pay for and approve an ONG.
    pub fn onboard_ong(&self) -> Address {
        let env = &self.env;
        let ong = Address::generate(env);
        token::StellarAssetClient::new(env, &self.token).mint(&ong, &FEE);
        self.identity.request_registration_ong(
            &ong,
            &OngProfile {
                wallet: ong.clone(),
                name: String::from_str(env, "ONG Verde"),
                country: String::from_str(env, "BO"),
                description: String::from_str(env, "Rural education"),
                metadata_uri: String::from_str(env, "ipfs://ong"),
                did_hash: None,
                verified: false,
            },
            &FEE,
        );
        self.identity.approve_ong(&self.admin, &ong);
        ong
    }

    pub fn register_professor(&self, ong: &Address) -> Address {
        let env = &self.env;
        let professor = Address::generate(env);
        self.identity.register_professor(
            ong,
            &professor,
            &ProfessorProfile {
                wallet: professor.clone(),
                name: String::from_str(env, "Juan Profesor"),
                specialty: String::from_str(env, "Agrotech"),
                metadata_uri: String::from_str(env, "ipfs://professor"),
                did_hash: None,
                associated_ongs: vec![env],
                active: true,
            },
        );
        professor
    }

    pub fn register_beneficiary(&self, ong: &Address) -> Address {
        let env = &self.env;
        let beneficiary = Address::generate(env);
        self.identity.register_beneficiary(
            ong,
            &beneficiary,
            &BeneficiaryProfile {
                wallet: beneficiary.clone(),
                community: String::from_str(env, "Comunidad Andina"),
                metadata_uri: String::from_str(env, "ipfs://beneficiary"),
                did_hash: None,
                active: true,
            },
        );
        beneficiary
    }

    /// Project running from T to T+1 day with a funding target of 10.
    pub fn create_project(&self, ong: &Address) -> u64 {
        let env = &self.env;
        self.projects.create_project(
            ong,
            &String::from_str(env, "Huertas escolares"),
            &String::from_str(env, "School gardens"),
            &Address::generate(env),
            &T,
            &(T + DAY),
            &10,
            &String::from_str(env, "ipfs://project"),
        )
    }

    /// Onboarded ONG, project, assigned professor with one TRAINING
    /// activity, and a registered beneficiary.
    pub fn staffed(&self) -> Staffed {
        let env = &self.env;
        let ong = self.onboard_ong();
        let professor = self.register_professor(&ong);
        let beneficiary = self.register_beneficiary(&ong);
        let project_id = self.create_project(&ong);
        self.projects.assign_professor(&ong, &project_id, &professor);
        self.projects.register_activity(
            &professor,
            &project_id,
            &ActivityKind::Training,
            &String::from_str(env, "Soil training"),
            &String::from_str(env, "Soil health basics"),
            &(T + 3_600),
            &String::from_str(env, "ipfs://activity"),
        );
        Staffed {
            ong,
            professor,
            beneficiary,
            project_id,
        }
    }

    pub fn package(&self, technician: &Address, beneficiary: &Address, byte: u8) -> EvidencePackage {
        let env = &self.env;
        EvidencePackage {
            session_id: String::from_str(env, "session-001"),
            technician: technician.clone(),
            timestamp: T + 7_200,
            location: GeoPoint {
                lat: -16_500_000,
                lng: -68_150_000,
                accuracy: 12,
            },
            photo_uris: vec![env, String::from_str(env, "ipfs://photo-1")],
            audio_uris: vec![env],
            biometric_hash: None,
            beneficiaries: vec![env, beneficiary.clone()],
            device: DeviceInfo {
                model: String::from_str(env, "Pixel 7"),
                os: String::from_str(env, "Android 14"),
                app_version: String::from_str(env, "1.4.0"),
            },
            package_hash: self.hash(byte),
            status: EvidenceStatus::Submitted,
        }
    }

    /// Register evidence `byte` for the staffed project.
    pub fn submit(&self, staffed: &Staffed, byte: u8) -> BytesN<32> {
        let package = self.package(&staffed.professor, &staffed.beneficiary, byte);
        self.key
            .register_evidence(&staffed.professor, &staffed.project_id, &package);
        package.package_hash
    }

    pub fn metadata(&self) -> String {
        String::from_str(&self.env, "ipfs://certificate")
    }
}
