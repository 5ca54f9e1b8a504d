//! Built-in sample resume.

/// Sample resume used by "Try Sample" and `rex sample`.
pub const SAMPLE_RESUME: &str = "John Doe
Senior Software Engineer

Contact:
Email: john.doe@email.com
Phone: +1-555-123-4567
LinkedIn: linkedin.com/in/johndoe
GitHub: github.com/johndoe

Summary:
Experienced software engineer with 5+ years in full-stack development,
specializing in Python, JavaScript, and cloud technologies.

Skills:
- Programming: Python, JavaScript, Java, C++
- Web: React, Node.js, Django, Flask
- Database: PostgreSQL, MongoDB, Redis
- Cloud: AWS, Docker, Kubernetes
- Tools: Git, Jenkins, Terraform

Experience:

Senior Software Engineer | Tech Corp | 2021 - Present
- Led development of microservices architecture serving 1M+ users
- Implemented CI/CD pipeline reducing deployment time by 60%
- Mentored team of 5 junior developers

Software Engineer | StartupXYZ | 2019 - 2021
- Built RESTful APIs using Python and Django
- Optimized database queries improving performance by 40%

Education:

Master of Science in Computer Science
Stanford University | 2017 - 2019

Bachelor of Technology in Computer Engineering
MIT | 2013 - 2017

Certifications:
- AWS Solutions Architect - Professional
- Certified Kubernetes Administrator (CKA)
";
